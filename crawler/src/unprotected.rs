use std::sync::OnceLock;

use reqwest::{Client, ClientBuilder, redirect::Policy};
use tracing::{debug, info};

use crate::{
    errors::CrawlerError,
    request::Request,
    traits::CrawlerResponse,
};

const USER_AGENT: &str = concat!("thumbcache/", env!("CARGO_PKG_VERSION"));

static REQWEST_CLIENT: OnceLock<Client> = OnceLock::new();

/// Plain HTTP crawler sharing one connection pool across the process
#[derive(Copy, Clone)]
pub struct UnprotectedCrawler {}

impl Default for UnprotectedCrawler {
    fn default() -> Self {
        Self::new()
    }
}

impl UnprotectedCrawler {
    pub fn new() -> Self {
        Self {}
    }

    fn create_client() -> Result<&'static Client, CrawlerError> {
        if let Some(client) = REQWEST_CLIENT.get() {
            return Ok(client);
        }

        let client = ClientBuilder::new()
            .gzip(true)
            .redirect(Policy::none())
            .user_agent(USER_AGENT)
            .build()
            .map_err(CrawlerError::ClientBuildFailed)?;

        // a racing initializer may have won, either client is fine
        Ok(REQWEST_CLIENT.get_or_init(|| client))
    }

    pub async fn make_web_request(
        &self,
        request: Request,
    ) -> Result<CrawlerResponse, CrawlerError> {
        let client = Self::create_client()?;

        let request_builder = client.get(request.url.clone());

        info!("Sending request to {}", request.url);

        let response = request_builder
            .send()
            .await
            .map_err(|err| CrawlerError::RequestFailed(request.url.clone(), err))?;

        debug!("{response:?}");

        let status = response.status();

        let raw_bytes = response
            .bytes()
            .await
            .map_err(|err| CrawlerError::BodyReadFailed(request.url.clone(), err))?
            .to_vec();

        Ok(CrawlerResponse { status, raw_bytes })
    }
}
