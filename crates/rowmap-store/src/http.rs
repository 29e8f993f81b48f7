//! Blocking HTTP implementation of the remote fetch collaborator

use crate::errors::fetch_error;
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;
use rowmap_core::errors::ExError;
use rowmap_core::fetch::RemoteFetcher;

/// Fetches remote content with a blocking `reqwest` client
///
/// The default client is built on first use, so a database that never
/// resolves a remote field never starts an HTTP client.
#[derive(Debug, Default)]
pub struct HttpFetcher {
    client: OnceCell<Client>,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured client (timeouts, proxies, headers)
    pub fn with_client(client: Client) -> Self {
        Self {
            client: OnceCell::with_value(client),
        }
    }

    fn client(&self) -> Result<&Client, ExError> {
        self.client.get_or_try_init(|| {
            Client::builder()
                .build()
                .map_err(|e| fetch_error("<client>", &e.to_string()))
        })
    }
}

impl RemoteFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, ExError> {
        tracing::debug!(url = url, "fetching remote content");
        let response = self
            .client()?
            .get(url)
            .send()
            .map_err(|e| fetch_error(url, &e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_error(url, &format!("HTTP status {}", status)));
        }

        let body = response
            .bytes()
            .map_err(|e| fetch_error(url, &e.to_string()))?;
        Ok(body.to_vec())
    }
}
