//! HTTP transport for chat-completion requests.

use std::time::Duration;

use ureq::Agent;

use crate::domain::ChatRequest;
use crate::error::{GenerateError, Result};

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Anything but 200 is reported; the body stays available to the parser.
    pub fn check_status(&self) -> Result<()> {
        if self.status == 200 {
            Ok(())
        } else {
            Err(GenerateError::UnexpectedStatus(self.status))
        }
    }
}

/// Sends a single request and returns the raw reply.
pub trait Transport {
    fn send(&self, request: &ChatRequest, api_key: &str) -> Result<RawResponse>;
}

/// Blocking transport over a pooled `ureq` agent. Safe to share between threads.
pub struct HttpTransport {
    agent: Agent,
    endpoint: String,
}

impl HttpTransport {
    /// `timeout` bounds the whole exchange; `None` keeps the agent default.
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Self {
        let config = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build();
        Self { agent: Agent::new_with_config(config), endpoint: endpoint.into() }
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &ChatRequest, api_key: &str) -> Result<RawResponse> {
        let payload = serde_json::to_vec(request).map_err(|err| {
            GenerateError::Transport(format!("failed to serialize request: {err}"))
        })?;

        tracing::debug!(
            "POST {} ({} bytes, model {})",
            self.endpoint,
            payload.len(),
            request.model
        );

        let mut response = self
            .agent
            .post(self.endpoint.as_str())
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Content-Type", "application/json")
            .send(&payload[..])
            .map_err(|err| {
                GenerateError::Transport(format!("request to {} failed: {err}", self.endpoint))
            })?;

        let status = response.status().as_u16();
        let body = response.body_mut().read_to_vec().map_err(|err| {
            GenerateError::Transport(format!("failed to read response body: {err}"))
        })?;

        tracing::debug!("Received status {} with {} bytes", status, body.len());
        Ok(RawResponse { status, body })
    }
}
