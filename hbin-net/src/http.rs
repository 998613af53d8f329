// hbin-net/src/http.rs
use std::sync::Arc;
use std::time::Duration;

use hbin_common::config::Config;
use hbin_common::error::{HbinError, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use tracing::{debug, error};

use crate::validation::validate_url;

const CONNECT_TIMEOUT_SECS: u64 = 30;
const USER_AGENT_STRING: &str = concat!("hbin/", env!("CARGO_PKG_VERSION"), " (Rust)");

/// Retrieves the full body at a URL. One request, no retries.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

impl<T: Fetcher + ?Sized> Fetcher for &T {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        (**self).fetch(url)
    }
}

impl<T: Fetcher + ?Sized> Fetcher for Arc<T> {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        (**self).fetch(url)
    }
}

/// Blocking HTTP(S) fetcher backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    allow_insecure: bool,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: build_http_client(config.http_timeout)?,
            allow_insecure: config.allow_insecure,
        })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        validate_url(url, self.allow_insecure)?;
        debug!("Fetching {}", url);

        let response = self.client.get(url).send().map_err(|e| {
            debug!("HTTP request failed for {url}: {e}");
            HbinError::Transport(format!("HTTP request failed for {url}: {e}"))
        })?;
        let status = response.status();
        debug!("Received HTTP status: {} for {}", status, url);

        if !status.is_success() {
            error!("HTTP error {} for URL {}", status, url);
            return Err(HbinError::Transport(format!(
                "HTTP error {status} for URL {url}"
            )));
        }

        let content = response
            .bytes()
            .map_err(|e| HbinError::Transport(format!("Failed to read response body from {url}: {e}")))?;
        debug!("Fetched {} bytes from {}", content.len(), url);
        Ok(content.to_vec())
    }
}

fn build_http_client(timeout: Duration) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_STRING));
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    Client::builder()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .default_headers(headers)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| HbinError::Transport(format!("Failed to build HTTP client: {e}")))
}
