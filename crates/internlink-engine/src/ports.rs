//! Collaborator ports consumed by the engine.
//!
//! The remote store and the local cache are external systems; the engine
//! only sees these two traits. Implementations live in `internlink-store`
//! and `internlink-cache`; tests substitute in-memory fakes.

use std::collections::BTreeSet;

use internlink_model::{HospitalRecord, Session};

/// Remote CRUD authority for hospital records.
///
/// `fetch_all` is public; the mutating calls require an authenticated
/// session and are only honoured by the backend for administrators.
#[allow(async_fn_in_trait)]
pub trait HospitalStore {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn fetch_all(&self) -> Result<Vec<HospitalRecord>, Self::Error>;

    async fn create(
        &self,
        session: &Session,
        record: &HospitalRecord,
    ) -> Result<HospitalRecord, Self::Error>;

    async fn update(
        &self,
        session: &Session,
        id: &str,
        record: &HospitalRecord,
    ) -> Result<HospitalRecord, Self::Error>;

    async fn delete(&self, session: &Session, id: &str) -> Result<(), Self::Error>;
}

/// On-device persistence of hospital records and the applied-id set.
///
/// Reads are infallible by contract: a broken cache degrades to empty,
/// never to an error — an empty screen start is acceptable, a crash on
/// startup is not. Writes are best-effort; the engine reports failures as
/// non-fatal and keeps its in-memory state authoritative.
#[allow(async_fn_in_trait)]
pub trait LocalCache {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn load_all(&self) -> Vec<HospitalRecord>;

    async fn upsert_all(&self, records: &[HospitalRecord]) -> Result<(), Self::Error>;

    async fn applied_ids(&self) -> BTreeSet<String>;

    async fn set_applied(&self, id: &str, applied: bool) -> Result<(), Self::Error>;
}
