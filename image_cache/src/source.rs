use async_trait::async_trait;
use crawler::{errors::CrawlerError, request::RequestBuilder, unprotected::UnprotectedCrawler};
use tracing::debug;

use crate::traits::ThumbnailSource;

/// Fetches thumbnails over the shared crawler HTTP session
#[derive(Default, Clone, Copy)]
pub struct HttpThumbnailSource {
    crawler: UnprotectedCrawler,
}

impl HttpThumbnailSource {
    pub fn new() -> Self {
        Self {
            crawler: UnprotectedCrawler::new(),
        }
    }
}

#[async_trait]
impl ThumbnailSource for HttpThumbnailSource {
    async fn fetch(&self, url: &str) -> Result<Option<Vec<u8>>, CrawlerError> {
        let request = RequestBuilder::new().set_url(url).build();
        let response = self.crawler.make_web_request(request).await?;

        if !response.is_ok() {
            debug!("{url} answered {}", response.status);
            return Ok(None);
        }

        Ok(Some(response.raw_bytes))
    }
}
