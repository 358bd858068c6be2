//! The listing engine: single owner of all mutable listing state.
//!
//! Every mutating operation runs on `&mut self`, recomputes the derived
//! views, publishes a fresh [`ListSnapshot`] on the watch channel, and
//! returns that snapshot. The only suspension point is the remote fetch,
//! whose completion re-enters the engine through [`ListingEngine::apply_refresh`]
//! guarded by a monotonic sequence number, so a superseded fetch can never
//! overwrite a fresher one.

use std::collections::BTreeSet;

use internlink_model::{HospitalRecord, Session};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::facets;
use crate::filter::{self, FilterSelection};
use crate::ports::{HospitalStore, LocalCache};
use crate::snapshot::ListSnapshot;

/// The client-side hospital list state machine.
pub struct ListingEngine<S, C> {
    store: S,
    cache: C,
    session: Option<Session>,
    /// Canonical collection; replaced wholesale on successful refresh.
    records: Vec<HospitalRecord>,
    applied: BTreeSet<String>,
    favourites: BTreeSet<String>,
    selection: FilterSelection,
    is_loading: bool,
    error: Option<String>,
    /// Sequence of the most recently issued fetch. Completions carrying an
    /// older sequence are dropped.
    issued_seq: u64,
    snapshot_tx: watch::Sender<ListSnapshot>,
}

impl<S, C> ListingEngine<S, C>
where
    S: HospitalStore,
    C: LocalCache,
{
    pub fn new(store: S, cache: C) -> Self {
        let (snapshot_tx, _) = watch::channel(ListSnapshot::default());
        Self {
            store,
            cache,
            session: None,
            records: Vec::new(),
            applied: BTreeSet::new(),
            favourites: BTreeSet::new(),
            selection: FilterSelection::default(),
            is_loading: false,
            error: None,
            issued_seq: 0,
            snapshot_tx,
        }
    }

    /// Subscribe to the snapshot stream. The receiver always holds the most
    /// recently published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<ListSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// The most recently published snapshot.
    pub fn snapshot(&self) -> ListSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// The current filter selection.
    pub fn filter_selection(&self) -> &FilterSelection {
        &self.selection
    }

    // ========================================================================
    // Loading & refresh
    // ========================================================================

    /// Publish the cached record set so the UI has something to show before
    /// any network round-trip completes.
    ///
    /// Never errors: an empty cache means an empty list, not a failure.
    pub async fn load_initial(&mut self) -> ListSnapshot {
        self.records = self.cache.load_all().await;
        self.applied = self.cache.applied_ids().await;
        self.is_loading = false;
        debug!(count = self.records.len(), "loaded hospitals from local cache");
        self.publish()
    }

    /// Fetch the full record set from the remote store and reconcile.
    ///
    /// Composes [`Self::begin_refresh`] and [`Self::apply_refresh`]; split
    /// out so message-driven shells can run the fetch themselves and feed
    /// the completion back in.
    pub async fn refresh(&mut self) -> ListSnapshot {
        let seq = self.begin_refresh();
        let result = self.store.fetch_all().await;
        self.apply_refresh(seq, result).await
    }

    /// Mark a fetch as issued: raises `is_loading`, clears any stale error,
    /// and returns the sequence number the completion must present.
    pub fn begin_refresh(&mut self) -> u64 {
        self.issued_seq += 1;
        self.is_loading = true;
        self.error = None;
        self.publish();
        self.issued_seq
    }

    /// Deliver a fetch completion.
    ///
    /// Completions whose sequence is not the latest issued are dropped —
    /// last-issued wins, not last-completed. On success the fetched set
    /// replaces the canonical collection (remote is authoritative for
    /// record content) and is persisted to the cache best-effort; on
    /// failure the collection is left untouched and the error is surfaced,
    /// stale-but-present data outranking an empty screen.
    pub async fn apply_refresh(
        &mut self,
        seq: u64,
        result: Result<Vec<HospitalRecord>, S::Error>,
    ) -> ListSnapshot {
        if seq != self.issued_seq {
            debug!(seq, latest = self.issued_seq, "dropping superseded fetch completion");
            return self.snapshot();
        }
        self.is_loading = false;
        match result {
            Ok(records) => {
                info!(count = records.len(), "refreshed hospitals from remote store");
                self.records = records;
                self.error = None;
                if let Err(error) = self.cache.upsert_all(&self.records).await {
                    warn!(%error, "failed to persist refreshed hospitals to local cache");
                }
            }
            Err(error) => {
                warn!(%error, "hospital refresh failed; keeping last known records");
                self.error = Some(format!("Network error: {error}"));
            }
        }
        self.publish()
    }

    // ========================================================================
    // Filter intents
    // ========================================================================

    /// Set the free-text search query; empty clears the dimension.
    pub fn set_search_query(&mut self, query: impl Into<String>) -> ListSnapshot {
        self.selection.search_query = query.into();
        self.publish()
    }

    /// Set the profession filter; empty clears the dimension.
    pub fn set_profession_filter(&mut self, profession: impl Into<String>) -> ListSnapshot {
        self.selection.profession = profession.into();
        self.publish()
    }

    /// Set the state filter; empty clears the dimension.
    pub fn set_state_filter(&mut self, state: impl Into<String>) -> ListSnapshot {
        self.selection.state = state.into();
        self.publish()
    }

    /// Set the salary-range filter; empty clears the dimension.
    pub fn set_salary_range_filter(&mut self, salary_range: impl Into<String>) -> ListSnapshot {
        self.selection.salary_range = salary_range.into();
        self.publish()
    }

    pub fn toggle_favourites_only(&mut self) -> ListSnapshot {
        self.selection.favourites_only = !self.selection.favourites_only;
        self.publish()
    }

    // ========================================================================
    // Favourites & applied
    // ========================================================================

    pub fn toggle_favourite(&mut self, id: &str) -> ListSnapshot {
        if !self.favourites.remove(id) {
            self.favourites.insert(id.to_string());
        }
        self.publish()
    }

    pub fn is_favourite(&self, id: &str) -> bool {
        self.favourites.contains(id)
    }

    /// Record that the user applied to a hospital.
    ///
    /// The in-memory change always sticks — the user just tapped the
    /// button — and a persistence failure is surfaced as a non-fatal error.
    pub async fn mark_applied(&mut self, id: &str) -> ListSnapshot {
        self.set_applied(id, true).await
    }

    pub async fn unmark_applied(&mut self, id: &str) -> ListSnapshot {
        self.set_applied(id, false).await
    }

    async fn set_applied(&mut self, id: &str, applied: bool) -> ListSnapshot {
        if applied {
            self.applied.insert(id.to_string());
        } else {
            self.applied.remove(id);
        }
        if let Err(error) = self.cache.set_applied(id, applied).await {
            warn!(%error, id, "failed to persist applied status");
            self.error = Some("Could not save your applied status on this device".to_string());
        }
        self.publish()
    }

    // ========================================================================
    // Session lifecycle
    // ========================================================================

    pub fn set_session(&mut self, session: Session) -> ListSnapshot {
        self.session = Some(session);
        self.publish()
    }

    pub fn clear_session(&mut self) -> ListSnapshot {
        self.session = None;
        self.publish()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Dismiss the current error message.
    pub fn clear_error(&mut self) -> ListSnapshot {
        self.error = None;
        self.publish()
    }

    // ========================================================================
    // Admin mutations
    // ========================================================================

    /// Create a listing on the backend, then refresh (remote stays
    /// authoritative for record content, including the assigned id).
    pub async fn create_hospital(&mut self, record: HospitalRecord) -> ListSnapshot {
        let Some(session) = self.session.clone() else {
            return self.admin_required();
        };
        self.is_loading = true;
        self.error = None;
        self.publish();
        match self.store.create(&session, &record).await {
            Ok(created) => {
                info!(id = %created.id, "hospital created");
                self.refresh().await
            }
            Err(error) => self.admin_failed("create", error),
        }
    }

    /// Update a listing on the backend, then refresh.
    pub async fn update_hospital(&mut self, id: &str, record: HospitalRecord) -> ListSnapshot {
        let Some(session) = self.session.clone() else {
            return self.admin_required();
        };
        self.is_loading = true;
        self.error = None;
        self.publish();
        match self.store.update(&session, id, &record).await {
            Ok(_) => {
                info!(id, "hospital updated");
                self.refresh().await
            }
            Err(error) => self.admin_failed("update", error),
        }
    }

    /// Delete a listing on the backend, then refresh.
    pub async fn delete_hospital(&mut self, id: &str) -> ListSnapshot {
        let Some(session) = self.session.clone() else {
            return self.admin_required();
        };
        self.is_loading = true;
        self.error = None;
        self.publish();
        match self.store.delete(&session, id).await {
            Ok(()) => {
                info!(id, "hospital deleted");
                self.refresh().await
            }
            Err(error) => self.admin_failed("delete", error),
        }
    }

    fn admin_required(&mut self) -> ListSnapshot {
        self.error = Some("You must be signed in as an administrator".to_string());
        self.publish()
    }

    fn admin_failed(&mut self, action: &str, error: S::Error) -> ListSnapshot {
        warn!(%error, action, "admin mutation failed");
        self.is_loading = false;
        self.error = Some(format!("Failed to {action} hospital: {error}"));
        self.publish()
    }

    // ========================================================================
    // Facet queries
    // ========================================================================

    /// Distinct professions across the canonical collection.
    pub fn available_professions(&self) -> Vec<String> {
        facets::available_professions(&self.records)
    }

    /// Distinct states across the canonical collection.
    pub fn available_states(&self) -> Vec<String> {
        facets::available_states(&self.records)
    }

    /// Distinct salary-range labels across the canonical collection.
    pub fn available_salary_ranges(&self) -> Vec<String> {
        facets::available_salary_ranges(&self.records)
    }

    // ========================================================================
    // Snapshot publication
    // ========================================================================

    fn publish(&mut self) -> ListSnapshot {
        let snapshot = self.build_snapshot();
        self.snapshot_tx.send_replace(snapshot.clone());
        snapshot
    }

    fn build_snapshot(&self) -> ListSnapshot {
        ListSnapshot {
            is_loading: self.is_loading,
            error: self.error.clone(),
            hospitals: self.records.clone(),
            filtered_hospitals: filter::apply_filters(
                &self.records,
                &self.selection,
                &self.favourites,
            ),
            applied_hospitals: self
                .records
                .iter()
                .filter(|h| self.applied.contains(&h.id))
                .cloned()
                .collect(),
            favourite_ids: self.favourites.clone(),
            show_favourites_only: self.selection.favourites_only,
            search_query: self.selection.search_query.clone(),
            selected_profession: self.selection.profession.clone(),
            selected_state: self.selection.state.clone(),
            selected_salary_range: self.selection.salary_range.clone(),
            is_logged_in: self.session.is_some(),
            is_admin: self.session.as_ref().is_some_and(|s| s.is_admin),
        }
    }
}

impl<S, C> std::fmt::Debug for ListingEngine<S, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListingEngine")
            .field("records", &self.records.len())
            .field("applied", &self.applied.len())
            .field("favourites", &self.favourites.len())
            .field("is_loading", &self.is_loading)
            .field("has_error", &self.error.is_some())
            .field("issued_seq", &self.issued_seq)
            .finish()
    }
}
