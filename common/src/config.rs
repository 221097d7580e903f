use std::{env, path::PathBuf};

pub const DEFAULT_CACHE_DIR: &str = "cache";
pub const DEFAULT_FALLBACK_URL: &str = "https://te.legra.ph/file/6298d377ad3eb46711644.jpg";
pub const DEFAULT_THUMBNAIL_HOST: &str = "https://i.ytimg.com";

pub const FULLSCREEN_WIDTH: u32 = 1920;
pub const FULLSCREEN_HEIGHT: u32 = 1080;

#[derive(Debug, Clone)]
pub struct ThumbConfig {
    /// Flat directory holding both the rendered PNGs and in-flight downloads
    pub cache_dir: PathBuf,
    /// Returned to callers whenever no artifact could be produced
    pub fallback_url: String,
    /// Scheme and host of the thumbnail source, without a trailing slash
    pub thumbnail_host: String,
    pub target_width: u32,
    pub target_height: u32,
}

impl Default for ThumbConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            fallback_url: DEFAULT_FALLBACK_URL.into(),
            thumbnail_host: DEFAULT_THUMBNAIL_HOST.into(),
            target_width: FULLSCREEN_WIDTH,
            target_height: FULLSCREEN_HEIGHT,
        }
    }
}

impl ThumbConfig {
    pub fn from_env() -> Self {
        let cache_dir = env::var("THUMB_CACHE_DIR").unwrap_or(DEFAULT_CACHE_DIR.into());
        let fallback_url = env::var("YOUTUBE_IMG_URL").unwrap_or(DEFAULT_FALLBACK_URL.into());
        let thumbnail_host = env::var("THUMB_SOURCE_HOST").unwrap_or(DEFAULT_THUMBNAIL_HOST.into());

        Self::default()
            .set_cache_dir(cache_dir)
            .set_fallback_url(fallback_url)
            .set_thumbnail_host(thumbnail_host)
    }

    pub fn set_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = cache_dir.into();

        self
    }

    pub fn set_fallback_url(mut self, fallback_url: impl Into<String>) -> Self {
        self.fallback_url = fallback_url.into();

        self
    }

    pub fn set_thumbnail_host(mut self, thumbnail_host: impl Into<String>) -> Self {
        self.thumbnail_host = thumbnail_host.into().trim_end_matches('/').to_string();

        self
    }

    pub fn set_target_size(mut self, width: u32, height: u32) -> Self {
        self.target_width = width;
        self.target_height = height;

        self
    }
}
