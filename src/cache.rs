use std::path::{Path, PathBuf};
use std::time::SystemTime;

use dashmap::DashMap;

use crate::error::GenmarkError;
use crate::scan::FileStatus;

/// Verdict cache keyed by (path, mtime). If the file changes, mtime changes
/// and the old entry is simply never hit again.
///
/// Only completed classifications are stored: a cancelled or failed
/// computation leaves the slot empty so the next caller retries.
#[derive(Default)]
pub struct VerdictCache {
    entries: DashMap<(PathBuf, SystemTime), FileStatus>,
}

impl VerdictCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cached verdict or compute and cache it.
    ///
    /// No lock is held while `compute` runs, so it may touch the cache
    /// itself and other keys in the same shard aren't blocked by a slow
    /// parse. Two callers racing on one key may both compute; the first
    /// insert wins and both return it.
    pub fn get_or_compute(
        &self,
        path: &Path,
        mtime: SystemTime,
        compute: impl FnOnce() -> Result<FileStatus, GenmarkError>,
    ) -> Result<FileStatus, GenmarkError> {
        let key = (path.to_path_buf(), mtime);
        if let Some(hit) = self.entries.get(&key) {
            return Ok(hit.value().clone());
        }
        let status = compute()?;
        Ok(self.entries.entry(key).or_insert(status).value().clone())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
