//! HTTP client for OLX search pages using wreq for browser emulation.

use crate::config::Config;
use crate::error::FetchError;
use async_trait::async_trait;
use tracing::{debug, info};
use wreq::Client;
use wreq_util::Emulation;

/// Source of raw search result pages - enables mocking for tests.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetches the page at `url` and returns its body.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// OLX HTTP client.
///
/// No request timeout is set: a server that never answers stalls the pass
/// until the connection drops.
pub struct OlxClient {
    client: Client,
    user_agent: String,
}

impl OlxClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let client = Client::builder().cookie_store(true).gzip(true).brotli(true).build()?;

        Ok(Self { client, user_agent: config.user_agent.clone() })
    }
}

#[async_trait]
impl ListingSource for OlxClient {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        info!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .emulation(Emulation::Chrome131)
            .header("User-Agent", self.user_agent.as_str())
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .header("Accept-Language", "pl-PL,pl;q=0.9,en;q=0.5")
            .header("Upgrade-Insecure-Requests", "1")
            .send()
            .await?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(FetchError::Status { url: url.to_string(), status: status.as_u16() });
        }

        let body = response.bytes().await?;
        debug!("Received {} bytes", body.len());

        Ok(body.to_vec())
    }
}
