//! On-device persistence for InternLink.
//!
//! Mirrors server records into a single cache file so the app has
//! something to show before any network round-trip completes, and keeps
//! the user's applied-id set across restarts.
//!
//! # File Format
//!
//! ```text
//! +--------------------+
//! | Magic: "ILC\x01"   | 4 bytes - file identification
//! +--------------------+
//! | Version: 1         | 4 bytes - u32 little-endian schema version
//! +--------------------+
//! | SHA-256 digest     | 32 bytes - integrity check over the payload
//! +--------------------+
//! | JSON payload       | Variable - `CacheFile`
//! +--------------------+
//! ```
//!
//! Reads are fail-soft: a missing, corrupt, or newer-versioned file
//! degrades to an empty cache at the port boundary. Writes are atomic
//! (temp file + rename). The applied-id set is stored as its own section
//! of the payload, so replacing the record list can never clear it.

mod cache;
mod entity;
mod error;
mod io;

pub use cache::FileCache;
pub use entity::{CacheFile, CachedHospital};
pub use error::{CacheError, Result};
pub use io::{
    CURRENT_SCHEMA_VERSION, MAGIC_BYTES, load_cache, load_cache_async, save_cache,
    save_cache_async,
};
