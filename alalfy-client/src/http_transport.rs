use alalfy_core::{RawResponse, Transport, TransportError};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::error::ClientResult;
use crate::settings::Settings;

#[derive(Debug, Clone)]
/// [`Transport`] over `reqwest`.
///
/// Sends bare GETs (no body, no credentials) and hands back whatever status
/// the server answered with.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Builds the underlying client with the configured timeouts.
    pub fn new(settings: &Settings) -> ClientResult<Self> {
        let client = Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.http_timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| TransportError::Network(err.to_string()))?;

        let status = response.status().as_u16();
        debug!(%url, status, "response received");

        let body = response
            .text()
            .await
            .map_err(|err| TransportError::Body(err.to_string()))?;
        Ok(RawResponse::new(status, body))
    }
}
