//! REST client for the hospital backend.

use std::time::Duration;

use internlink_engine::HospitalStore;
use internlink_model::{HospitalRecord, Session};
use reqwest::Response;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;

use crate::error::{Result, StoreError};

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("internlink/", env!("CARGO_PKG_VERSION"));

/// Maximum number of body characters carried into a status error.
const BODY_EXCERPT_LEN: usize = 200;

/// Client for the backend's hospital routes.
///
/// Listing reads are public; create/update/delete hit the `/admin` routes
/// and carry the session's Bearer token.
#[derive(Debug, Clone)]
pub struct RestHospitalStore {
    client: reqwest::Client,
    base_url: String,
}

impl RestHospitalStore {
    /// Create a client for the given backend base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn hospitals_url(&self) -> String {
        format!("{}/hospitals", self.base_url)
    }

    fn admin_url(&self) -> String {
        format!("{}/admin/hospitals", self.base_url)
    }

    fn admin_item_url(&self, id: &str) -> String {
        format!("{}/admin/hospitals/{}", self.base_url, id)
    }
}

impl HospitalStore for RestHospitalStore {
    type Error = StoreError;

    async fn fetch_all(&self) -> Result<Vec<HospitalRecord>> {
        let url = self.hospitals_url();
        debug!(%url, "fetching hospitals");
        let response = check_status(self.client.get(&url).send().await?).await?;
        response
            .json::<Vec<HospitalRecord>>()
            .await
            .map_err(|source| StoreError::Decode { source })
    }

    async fn create(&self, session: &Session, record: &HospitalRecord) -> Result<HospitalRecord> {
        let url = self.admin_url();
        debug!(%url, "creating hospital");
        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, session.bearer())
            .json(record)
            .send()
            .await?;
        let response = check_status(response).await?;
        response
            .json::<HospitalRecord>()
            .await
            .map_err(|source| StoreError::Decode { source })
    }

    async fn update(
        &self,
        session: &Session,
        id: &str,
        record: &HospitalRecord,
    ) -> Result<HospitalRecord> {
        let url = self.admin_item_url(id);
        debug!(%url, "updating hospital");
        let response = self
            .client
            .put(&url)
            .header(AUTHORIZATION, session.bearer())
            .json(record)
            .send()
            .await?;
        let response = check_status(response).await?;
        response
            .json::<HospitalRecord>()
            .await
            .map_err(|source| StoreError::Decode { source })
    }

    async fn delete(&self, session: &Session, id: &str) -> Result<()> {
        let url = self.admin_item_url(id);
        debug!(%url, "deleting hospital");
        let response = self
            .client
            .delete(&url)
            .header(AUTHORIZATION, session.bearer())
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}

/// Turn a non-success response into a `Status` error carrying a short
/// body excerpt (the backend puts its reason in the body).
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(StoreError::Status {
        status: status.as_u16(),
        message: excerpt(&body),
    })
}

fn excerpt(body: &str) -> String {
    body.trim().chars().take(BODY_EXCERPT_LEN).collect()
}
