use std::path::{Path, PathBuf};

use common::cache_key::CacheKey;
use tokio::fs;

use crate::errors::ThumbError;

/// Maps cache keys onto the flat cache directory
#[derive(Debug, Clone)]
pub(crate) struct CacheResolver {
    cache_dir: PathBuf,
}

impl CacheResolver {
    pub(crate) fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    pub(crate) async fn ensure_dir(&self) -> Result<(), ThumbError> {
        fs::create_dir_all(&self.cache_dir)
            .await
            .map_err(|err| ThumbError::persist(&self.cache_dir, err))
    }

    pub(crate) fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub(crate) fn final_path(&self, key: &CacheKey) -> PathBuf {
        self.cache_dir.join(key.file_name())
    }

    /// Only existence of a regular file is checked, never content or age
    pub(crate) async fn is_cached(&self, path: &Path) -> bool {
        fs::metadata(path)
            .await
            .map(|metadata| metadata.is_file())
            .unwrap_or(false)
    }
}
