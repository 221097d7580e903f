use std::{
    fmt::{Display, Formatter, Result},
    path::{Path, PathBuf},
};

use strum_macros::{AsRefStr, EnumIter};

/// Remote thumbnail variants, declared in the order they are attempted
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum ThumbnailQuality {
    /// Only exists for videos uploaded in HD
    MaxResDefault,
    /// Always available
    HqDefault,
}

impl ThumbnailQuality {
    pub fn url(&self, thumbnail_host: &str, videoid: &str) -> String {
        format!("{thumbnail_host}/vi/{videoid}/{}.jpg", self.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThumbResult {
    /// Rendered artifact on local disk, either found or freshly produced
    CacheHit(PathBuf),
    /// No artifact could be produced, use this URL instead
    Fallback(String),
}

impl ThumbResult {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::CacheHit(path) => Some(path),
            Self::Fallback(_) => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

impl Display for ThumbResult {
    fn fmt(&self, format: &mut Formatter) -> Result {
        match self {
            Self::CacheHit(path) => write!(format, "{}", path.display()),
            Self::Fallback(url) => write!(format, "{url}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn tiers_try_max_resolution_first() {
        let urls: Vec<String> = ThumbnailQuality::iter()
            .map(|quality| quality.url("https://i.ytimg.com", "dQw4w9WgXcQ"))
            .collect();

        assert_eq!(
            urls,
            vec![
                "https://i.ytimg.com/vi/dQw4w9WgXcQ/maxresdefault.jpg",
                "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg",
            ]
        );
    }

    #[test]
    fn fallback_has_no_path() {
        let result = ThumbResult::Fallback("https://example.com/a.jpg".into());

        assert!(result.is_fallback());
        assert_eq!(result.path(), None);
        assert_eq!(result.to_string(), "https://example.com/a.jpg");
    }
}
