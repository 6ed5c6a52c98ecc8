//! LINE Messaging API broadcast client

use async_trait::async_trait;
use reqwest::Client;

use crate::config::Config;
use crate::credentials::ChannelToken;
use crate::error::{Result, TransportError};
use crate::platforms::Broadcaster;
use crate::types::{BroadcastRequest, BroadcastResponse, Message};

/// Map a reqwest failure to a transport error
///
/// `context` names the step that failed ("send", "read body").
fn map_reqwest_error(error: reqwest::Error, context: &str) -> TransportError {
    if error.is_timeout() {
        return TransportError::Network(format!(
            "LINE API timed out during {}: {}",
            context, error
        ));
    }
    if error.is_connect() {
        return TransportError::Network(format!(
            "Could not connect to the LINE API during {}: {}. Check your internet connection.",
            context, error
        ));
    }
    TransportError::Network(format!("LINE API request failed during {}: {}", context, error))
}

#[derive(Debug)]
pub struct LineClient {
    http: Client,
    token: ChannelToken,
    url: String,
}

impl LineClient {
    pub fn new(config: &Config, token: ChannelToken) -> Result<Self> {
        Self::with_url(config.broadcast_url(), token)
    }

    /// Client posting to an explicit broadcast URL
    pub fn with_url(url: impl Into<String>, token: ChannelToken) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("linecast/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Network(format!("HTTP client error: {}", e)))?;

        Ok(Self {
            http,
            token,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Broadcaster for LineClient {
    async fn broadcast(&self, messages: &[Message]) -> Result<BroadcastResponse> {
        tracing::debug!("Broadcasting {} message(s) to {}", messages.len(), self.url);

        let response = self
            .http
            .post(&self.url)
            .header(reqwest::header::AUTHORIZATION, self.token.bearer())
            .json(&BroadcastRequest { messages })
            .send()
            .await
            .map_err(|e| map_reqwest_error(e, "send"))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| map_reqwest_error(e, "read body"))?;

        if !status.is_success() {
            tracing::warn!("LINE API answered HTTP {}", status.as_u16());
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: text,
            }
            .into());
        }

        Ok(BroadcastResponse::from_body(status.as_u16(), &text))
    }

    fn name(&self) -> &str {
        "line"
    }
}
