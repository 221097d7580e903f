use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use common::{
    cache_key::CacheKey,
    config::ThumbConfig,
    thumbnail::{ThumbResult, ThumbnailQuality},
};
use strum::IntoEnumIterator;
use tracing::{debug, error, info};

use crate::{
    errors::{FetchFailure, ThumbError},
    key_lock::KeyLocks,
    render::{self, RenderSize},
    resolver::CacheResolver,
    source::HttpThumbnailSource,
    staging,
    traits::ThumbnailSource,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub path: PathBuf,
    /// `false` when this call rendered the artifact
    pub from_cache: bool,
}

pub struct ThumbCache {
    config: ThumbConfig,
    resolver: CacheResolver,
    source: Arc<dyn ThumbnailSource>,
    locks: KeyLocks,
}

impl ThumbCache {
    /// Creates the cache directory, must run once before the first lookup
    pub async fn init(config: ThumbConfig) -> Result<Self, ThumbError> {
        Self::with_source(config, Arc::new(HttpThumbnailSource::new())).await
    }

    pub async fn with_source(
        config: ThumbConfig,
        source: Arc<dyn ThumbnailSource>,
    ) -> Result<Self, ThumbError> {
        let resolver = CacheResolver::new(config.cache_dir.clone());
        resolver.ensure_dir().await?;

        Ok(Self {
            config,
            resolver,
            source,
            locks: KeyLocks::default(),
        })
    }

    pub fn config(&self) -> &ThumbConfig {
        &self.config
    }

    /// Never fails, any error becomes the configured fallback URL
    pub async fn get_thumb(&self, videoid: impl ToString, user_id: impl ToString) -> ThumbResult {
        let outcome = self.resolve(videoid, user_id).await;

        self.collapse(outcome)
    }

    pub fn collapse(&self, outcome: Result<Resolved, ThumbError>) -> ThumbResult {
        match outcome {
            Ok(resolved) => ThumbResult::CacheHit(resolved.path),
            Err(err) => {
                error!("THUMB ERROR: {err}");
                ThumbResult::Fallback(self.config.fallback_url.clone())
            }
        }
    }

    pub async fn resolve(
        &self,
        videoid: impl ToString,
        user_id: impl ToString,
    ) -> Result<Resolved, ThumbError> {
        let key = CacheKey::new(videoid, user_id)?;
        let final_path = self.resolver.final_path(&key);

        if self.resolver.is_cached(&final_path).await {
            debug!("Cache hit for {key}");
            return Ok(Resolved {
                path: final_path,
                from_cache: true,
            });
        }

        let _guard = self.locks.lock(&key).await;

        // a concurrent miss for the same key may have rendered it meanwhile
        if self.resolver.is_cached(&final_path).await {
            debug!("Cache hit for {key} after waiting on render");
            return Ok(Resolved {
                path: final_path,
                from_cache: true,
            });
        }

        debug!("Cache miss for {key}");

        let image_bytes = self.fetch(&key).await?;
        self.render(&key, image_bytes, &final_path).await?;

        info!("Rendered {}", final_path.display());

        Ok(Resolved {
            path: final_path,
            from_cache: false,
        })
    }

    async fn fetch(&self, key: &CacheKey) -> Result<Vec<u8>, ThumbError> {
        for quality in ThumbnailQuality::iter() {
            let url = quality.url(&self.config.thumbnail_host, key.videoid());

            match self.source.fetch(&url).await {
                Ok(Some(image_bytes)) => {
                    debug!("Fetched {} bytes from {url}", image_bytes.len());
                    return Ok(image_bytes);
                }
                Ok(None) => debug!("{url} unavailable, trying next tier"),
                Err(err) => {
                    return Err(ThumbError::FetchFailed {
                        videoid: key.videoid().to_string(),
                        cause: FetchFailure::Session(err),
                    });
                }
            }
        }

        Err(ThumbError::FetchFailed {
            videoid: key.videoid().to_string(),
            cause: FetchFailure::NoTierAvailable,
        })
    }

    async fn render(
        &self,
        key: &CacheKey,
        image_bytes: Vec<u8>,
        final_path: &Path,
    ) -> Result<(), ThumbError> {
        let cache_dir = self.resolver.cache_dir().to_path_buf();
        let final_path = final_path.to_path_buf();
        let key = key.clone();
        let target = RenderSize::new(self.config.target_width, self.config.target_height);

        tokio::task::spawn_blocking(move || {
            // dropping the download removes it on every path out of here
            let download = staging::stage_download(&cache_dir, &key, &image_bytes)?;
            let png = render::render_png(download.path(), target)?;

            staging::persist_png(&cache_dir, &key, &png, &final_path)
        })
        .await?
    }
}
