use async_trait::async_trait;
use crawler::errors::CrawlerError;

/// Where raw thumbnail bytes come from
#[async_trait]
pub trait ThumbnailSource: Send + Sync {
    /// `Ok(None)` when the URL answered with anything but 200
    async fn fetch(&self, url: &str) -> Result<Option<Vec<u8>>, CrawlerError>;
}
