//! HTTP adapter for fetching remote JSON-LD contexts

use std::future::Future;
use std::time::Duration;

use ldesim_domain::fragment::JSON_LD_MEDIA_TYPE;
use ldesim_domain::storage::ContextFetcher;
use reqwest::header::ACCEPT;
use reqwest::Client;
use tracing::{debug, instrument, warn};
use url::Url;

/// Fetches context documents over HTTP
///
/// Every failure (transport error, timeout, non-success status) yields
/// `None`, leaving the reference remote.
#[derive(Clone)]
pub struct HttpContextFetcher {
    client: Client,
}

impl HttpContextFetcher {
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl ContextFetcher for HttpContextFetcher {
    #[instrument(skip(self), fields(url = %url))]
    fn fetch(&self, url: &Url) -> impl Future<Output = Option<Vec<u8>>> + Send {
        let client = self.client.clone();
        let url = url.clone();

        async move {
            debug!(url = %url, "Fetching context");

            let response = match client
                .get(url.clone())
                .header(ACCEPT, JSON_LD_MEDIA_TYPE)
                .send()
                .await
            {
                Ok(response) => response,
                Err(err) => {
                    warn!(url = %url, error = %err, "Failed to fetch context");
                    return None;
                }
            };

            let status = response.status();
            if !status.is_success() {
                warn!(url = %url, status = %status, "Context request was not successful");
                return None;
            }

            match response.bytes().await {
                Ok(body) => Some(body.to_vec()),
                Err(err) => {
                    warn!(url = %url, error = %err, "Failed to read context body");
                    None
                }
            }
        }
    }
}
