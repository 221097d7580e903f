use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrawlerError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuildFailed(reqwest::Error),
    #[error("Request to {0} failed")]
    RequestFailed(String, #[source] reqwest::Error),
    #[error("Failed to read response body from {0}")]
    BodyReadFailed(String, #[source] reqwest::Error),
}
