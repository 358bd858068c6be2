//! The file-backed `LocalCache` port implementation.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use internlink_engine::LocalCache;
use internlink_model::HospitalRecord;
use tracing::warn;

use crate::entity::{CacheFile, CachedHospital};
use crate::error::CacheError;
use crate::io;

/// Hospital cache stored in a single file.
///
/// Reads never fail: a missing file is an empty cache, and a damaged one
/// is logged and treated as empty (the next successful refresh rewrites
/// it). Writes report their errors so the engine can surface a non-fatal
/// message.
#[derive(Debug, Clone)]
pub struct FileCache {
    path: PathBuf,
}

impl FileCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> CacheFile {
        if !self.path.exists() {
            return CacheFile::new();
        }
        match io::load_cache_async(self.path.clone()).await {
            Ok(file) => file,
            Err(error) => {
                warn!(%error, path = %self.path.display(), "unreadable hospital cache; starting empty");
                CacheFile::new()
            }
        }
    }
}

impl LocalCache for FileCache {
    type Error = CacheError;

    async fn load_all(&self) -> Vec<HospitalRecord> {
        self.read()
            .await
            .hospitals
            .into_iter()
            .map(CachedHospital::into_record)
            .collect()
    }

    async fn upsert_all(&self, records: &[HospitalRecord]) -> Result<(), CacheError> {
        let mut file = self.read().await;
        file.hospitals = records.iter().map(CachedHospital::from_record).collect();
        io::save_cache_async(file, self.path.clone()).await
    }

    async fn applied_ids(&self) -> BTreeSet<String> {
        self.read().await.applied
    }

    async fn set_applied(&self, id: &str, applied: bool) -> Result<(), CacheError> {
        let mut file = self.read().await;
        if applied {
            file.applied.insert(id.to_string());
        } else {
            file.applied.remove(id);
        }
        io::save_cache_async(file, self.path.clone()).await
    }
}
