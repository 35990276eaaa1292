//! HTTP transport
//!
//! JSON over POST to a single game endpoint. Runs on the `RemoteClient`
//! worker thread, so blocking I/O is fine here.

use std::time::Duration;

use crate::client::Transport;
use crate::error::RemoteError;
use crate::protocol::{ApiRequest, ApiResponse};

/// Blocking HTTP transport for the game endpoint.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    endpoint: String,
    csrf_token: Option<String>,
}

impl HttpTransport {
    /// Build a transport for `<base_url>/game/slots/<game>`.
    pub fn new(base_url: impl AsRef<str>, game: impl AsRef<str>) -> Result<Self, RemoteError> {
        let client = reqwest::blocking::Client::builder()
            // No request timeout: the protocol has none; a never-arriving
            // response keeps the session in the requesting state.
            .timeout(None::<Duration>)
            .build()?;
        Ok(Self {
            client,
            endpoint: format!(
                "{}/game/slots/{}",
                base_url.as_ref().trim_end_matches('/'),
                game.as_ref()
            ),
            csrf_token: None,
        })
    }

    /// Attach the anti-CSRF header the backend expects.
    pub fn with_csrf_token(mut self, token: impl Into<String>) -> Self {
        self.csrf_token = Some(token.into());
        self
    }

    /// Endpoint URL this transport posts to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Transport for HttpTransport {
    fn send(&mut self, request: &ApiRequest) -> Result<ApiResponse, RemoteError> {
        let mut builder = self.client.post(&self.endpoint).json(&request.body());
        if let Some(token) = &self.csrf_token {
            builder = builder.header("X-Csrf-Token", token);
        }

        log::debug!("POST {} {:?}", self.endpoint, request);
        let response = builder.send()?.error_for_status()?;

        match request {
            ApiRequest::Init => Ok(ApiResponse::Init(response.json()?)),
            ApiRequest::Spin { .. } => Ok(ApiResponse::Spin(response.json()?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_shape() {
        let transport = HttpTransport::new("https://example.test/", "Chipy").unwrap();
        assert_eq!(transport.endpoint(), "https://example.test/game/slots/Chipy");
    }
}
