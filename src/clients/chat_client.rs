//! ChatCBI relay: authenticated question forwarding with normalized results.

use reqwest::{Client, StatusCode};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{info, warn};

use super::token_provider::{TokenProvider, TokenSource};
use crate::core::config::CbiConfig;
use crate::core::models::{ChatRequest, ChatResult};
use crate::errors::ChatRequestError;

pub struct ChatCbiClient {
    http: Client,
    config: Arc<CbiConfig>,
    tokens: Arc<dyn TokenSource>,
}

impl ChatCbiClient {
    /// Builds a relay with its own token cache and the system clock.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: CbiConfig) -> Result<Self, ChatRequestError> {
        let http = Client::builder()
            .build()
            .map_err(|e| ChatRequestError::Http(format!("Failed to build HTTP client: {e}")))?;
        let config = Arc::new(config);
        let tokens = Arc::new(TokenProvider::new(http.clone(), Arc::clone(&config)));
        Ok(Self {
            http,
            config,
            tokens,
        })
    }

    /// Builds a relay around an existing token source, e.g. one shared
    /// between several relays or driven by a manual clock.
    #[must_use]
    pub fn with_token_source(
        http: Client,
        config: Arc<CbiConfig>,
        tokens: Arc<dyn TokenSource>,
    ) -> Self {
        Self {
            http,
            config,
            tokens,
        }
    }

    #[must_use]
    pub fn config(&self) -> &CbiConfig {
        &self.config
    }

    /// Sends a question and folds every failure into an error-tagged result.
    pub async fn ask(&self, question: &str) -> ChatResult {
        match self.try_ask(question).await {
            Ok(payload) => ChatResult::Success(payload),
            Err(e) => {
                warn!(code = e.status_code(), error = %e, "ChatCBI request failed");
                ChatResult::from(e)
            }
        }
    }

    /// # Errors
    ///
    /// Returns an error for an empty question, a failed token exchange, a
    /// transport failure, a non-2xx answer, or a body that is not a JSON object.
    pub async fn try_ask(&self, question: &str) -> Result<Map<String, Value>, ChatRequestError> {
        if question.trim().is_empty() {
            return Err(ChatRequestError::EmptyQuestion);
        }

        let token = self.tokens.get_token().await?;

        #[cfg(feature = "debug-logs")]
        info!(question = %question, "Sending ChatCBI request");
        #[cfg(not(feature = "debug-logs"))]
        info!(chars = question.chars().count(), "Sending ChatCBI request");

        let response = self
            .http
            .post(self.config.chat_url())
            .bearer_auth(&token)
            .timeout(self.config.chat_timeout)
            .json(&ChatRequest { message: question })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            if status == StatusCode::UNAUTHORIZED {
                self.tokens.invalidate().await;
            }
            let body = response.text().await.unwrap_or_else(|e| {
                format!("Failed to read error response body (status {status}): {e}")
            });
            return Err(ChatRequestError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response.json().await.map_err(|e| ChatRequestError::Parse {
            status: status.as_u16(),
            reason: e.to_string(),
        })?;

        match body {
            Value::Object(payload) => {
                info!("ChatCBI response received");
                Ok(payload)
            }
            other => Err(ChatRequestError::Parse {
                status: status.as_u16(),
                reason: format!("expected a JSON object, got {}", json_kind(&other)),
            }),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
