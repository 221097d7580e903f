use reqwest::StatusCode;

#[derive(Debug)]
pub struct CrawlerResponse {
    pub status: StatusCode,
    pub raw_bytes: Vec<u8>,
}

impl CrawlerResponse {
    /// Only a plain 200 counts, redirects and other 2xx do not
    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK
    }
}
