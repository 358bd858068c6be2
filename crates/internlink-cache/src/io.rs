//! Cache file I/O.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::entity::CacheFile;
use crate::error::{CacheError, Result};

/// File identification bytes.
pub const MAGIC_BYTES: [u8; 4] = *b"ILC\x01";

/// Current cache schema version.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Magic + version + SHA-256 digest.
const HEADER_LEN: usize = 4 + 4 + 32;

/// Save a cache payload to disk.
///
/// Uses atomic write (temp file + rename) so a crash mid-write can never
/// leave a half-written cache behind.
pub fn save_cache(cache: &mut CacheFile, path: &Path) -> Result<()> {
    cache.touch();

    let payload = serde_json::to_vec(cache).map_err(|e| CacheError::Serialization {
        source: Box::new(e),
    })?;
    let digest = Sha256::digest(&payload);

    let mut output = Vec::with_capacity(HEADER_LEN + payload.len());
    output.extend_from_slice(&MAGIC_BYTES);
    output.extend_from_slice(&CURRENT_SCHEMA_VERSION.to_le_bytes());
    output.extend_from_slice(&digest);
    output.extend_from_slice(&payload);

    let temp_path = path.with_extension("ilc.tmp");

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| CacheError::Io {
            operation: "create directory for",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let mut file = File::create(&temp_path).map_err(|e| CacheError::Io {
        operation: "create",
        path: temp_path.clone(),
        source: e,
    })?;

    file.write_all(&output).map_err(|e| CacheError::Io {
        operation: "write",
        path: temp_path.clone(),
        source: e,
    })?;

    file.sync_all().map_err(|e| CacheError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| CacheError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source: e,
    })?;

    tracing::debug!("saved hospital cache to {}", path.display());
    Ok(())
}

/// Load a cache payload from disk, verifying header and integrity digest.
pub fn load_cache(path: &Path) -> Result<CacheFile> {
    let bytes = fs::read(path).map_err(|e| CacheError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes.len() < HEADER_LEN {
        return Err(CacheError::InvalidFormat {
            path: path.to_path_buf(),
            reason: "file shorter than header".to_string(),
        });
    }

    if bytes[0..4] != MAGIC_BYTES {
        return Err(CacheError::InvalidFormat {
            path: path.to_path_buf(),
            reason: "bad magic bytes".to_string(),
        });
    }

    let version = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    if version > CURRENT_SCHEMA_VERSION {
        return Err(CacheError::UnsupportedVersion {
            found: version,
            max_supported: CURRENT_SCHEMA_VERSION,
            path: path.to_path_buf(),
        });
    }

    let mut expected = [0u8; 32];
    expected.copy_from_slice(&bytes[8..HEADER_LEN]);
    let payload = &bytes[HEADER_LEN..];
    let actual = Sha256::digest(payload);
    if actual[..] != expected {
        return Err(CacheError::ChecksumMismatch {
            path: path.to_path_buf(),
            expected: hex::encode(expected),
            actual: hex::encode(actual),
        });
    }

    serde_json::from_slice(payload).map_err(|e| CacheError::Deserialization {
        source: Box::new(e),
    })
}

/// Save a cache payload on the blocking thread pool.
pub async fn save_cache_async(cache: CacheFile, path: PathBuf) -> Result<()> {
    tokio::task::spawn_blocking(move || {
        let mut cache = cache;
        save_cache(&mut cache, &path)
    })
    .await
    .map_err(|e| CacheError::Serialization {
        source: Box::new(e),
    })?
}

/// Load a cache payload on the blocking thread pool.
pub async fn load_cache_async(path: PathBuf) -> Result<CacheFile> {
    tokio::task::spawn_blocking(move || load_cache(&path))
        .await
        .map_err(|e| CacheError::Deserialization {
            source: Box::new(e),
        })?
}
