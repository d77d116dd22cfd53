use alalfy_core::{
    ApiConfig, ContentApi, DEFAULT_API_BASE_URL, DEFAULT_FEED_URL, RawResponse, Transport,
    TransportError,
};
use async_trait::async_trait;
use gloo_net::http::Request;

const API_BASE_URL: &str = match option_env!("ALALFY_API_BASE_URL") {
    Some(value) => value,
    None => DEFAULT_API_BASE_URL,
};

const FEED_URL: &str = match option_env!("ALALFY_FEED_URL") {
    Some(value) => value,
    None => DEFAULT_FEED_URL,
};

/// Content API as used by every page.
pub(crate) type Api = ContentApi<GlooTransport>;

#[derive(Debug, Clone, Copy, Default)]
/// `fetch`-based transport.
pub(crate) struct GlooTransport;

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, TransportError> {
        let response = Request::get(url)
            .send()
            .await
            .map_err(|err| TransportError::Network(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| TransportError::Body(err.to_string()))?;
        Ok(RawResponse::new(status, body))
    }
}

pub(crate) fn content_api() -> Api {
    ContentApi::new(
        GlooTransport,
        ApiConfig {
            base_url: API_BASE_URL.to_string(),
            feed_url: FEED_URL.to_string(),
        },
    )
}
