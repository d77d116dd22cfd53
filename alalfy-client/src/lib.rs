//! Native HTTP stack for the Alalfy Dev content layer.
//!
//! Plugs a `reqwest` [`Transport`](alalfy_core::Transport) into
//! [`ContentApi`] and reads its endpoints and timeouts from the environment.
#![warn(missing_docs)]

mod error;
mod http_transport;
mod settings;

use alalfy_core::ContentApi;

pub use error::{ClientError, ClientResult};
pub use http_transport::HttpTransport;
pub use settings::{
    API_BASE_URL_ENV, CONNECT_TIMEOUT_ENV, FEED_URL_ENV, HTTP_TIMEOUT_ENV, Settings,
    SettingsError,
};

/// Content API over the native HTTP transport.
pub type BlogApi = ContentApi<HttpTransport>;

/// Builds the content API for `settings`.
pub fn connect(settings: &Settings) -> ClientResult<BlogApi> {
    let transport = HttpTransport::new(settings)?;
    Ok(ContentApi::new(transport, settings.api_config()))
}
