//! The hospital list state machine.
//!
//! `ListingEngine` owns the canonical in-memory hospital collection and
//! derives a filtered, favourite-aware, applied-aware view from it under a
//! session-scoped filter selection. It coordinates refresh between a local
//! cache and a remote store with an offline-first, fail-soft policy: the
//! cache snapshot shows immediately, the network fetch replaces it on
//! success, and on failure the last known-good view stays visible behind a
//! dismissible error.
//!
//! The engine is generic over its two collaborators, the [`HospitalStore`]
//! and [`LocalCache`] ports. Consumers read immutable [`ListSnapshot`]
//! values — either the return value of each intent call or the
//! `tokio::sync::watch` stream from [`ListingEngine::subscribe`] — and
//! never touch engine state directly.

mod engine;
mod facets;
mod filter;
mod ports;
mod snapshot;

pub use engine::ListingEngine;
pub use facets::{available_professions, available_salary_ranges, available_states};
pub use filter::{FilterSelection, apply_filters};
pub use ports::{HospitalStore, LocalCache};
pub use snapshot::ListSnapshot;
