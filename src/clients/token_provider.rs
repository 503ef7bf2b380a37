//! Bearer token exchange and in-memory cache.

use async_trait::async_trait;
use chrono::Duration as ChronoDuration;
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::core::clock::{Clock, SystemClock};
use crate::core::config::CbiConfig;
use crate::core::models::{AuthorizeRequest, AuthorizeResponse};
use crate::core::token::CachedToken;
use crate::errors::{AUTH_HINT, AuthError};

/// Source of bearer tokens for the chat relay.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if a fresh token cannot be obtained.
    async fn get_token(&self) -> Result<String, AuthError>;

    /// Drops any cached token so the next call performs a fresh exchange.
    async fn invalidate(&self);
}

pub struct TokenProvider {
    http: Client,
    config: Arc<CbiConfig>,
    clock: Arc<dyn Clock>,
    cache: Mutex<CachedToken>,
}

impl TokenProvider {
    #[must_use]
    pub fn new(http: Client, config: Arc<CbiConfig>) -> Self {
        Self::with_clock(http, config, Arc::new(SystemClock))
    }

    #[must_use]
    pub fn with_clock(http: Client, config: Arc<CbiConfig>, clock: Arc<dyn Clock>) -> Self {
        Self {
            http,
            config,
            clock,
            cache: Mutex::new(CachedToken::empty()),
        }
    }

    /// Snapshot of the current cache entry.
    pub async fn cached(&self) -> CachedToken {
        self.cache.lock().await.clone()
    }

    async fn exchange(&self) -> Result<String, AuthError> {
        info!(url = %self.config.authorize_url(), "Requesting new ChatCBI token");

        let body = AuthorizeRequest {
            client_id: &self.config.client_id,
            client_secret: self.config.client_secret(),
        };

        let response = self
            .http
            .post(self.config.authorize_url())
            .timeout(self.config.auth_timeout)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|e| {
                format!("Failed to read error response body (status {status}): {e}")
            });
            error!(
                status = status.as_u16(),
                body = %body,
                "ChatCBI token request failed. {AUTH_HINT}"
            );
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: AuthorizeResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Parse(e.to_string()))?;

        parsed
            .token
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingToken)
    }

    fn ttl(&self) -> Result<ChronoDuration, AuthError> {
        ChronoDuration::from_std(self.config.token_ttl)
            .map_err(|e| AuthError::InvalidTtl(format!("{:?}: {e}", self.config.token_ttl)))
    }
}

#[async_trait]
impl TokenSource for TokenProvider {
    /// Returns the cached token while it has more than a minute left,
    /// otherwise exchanges the credentials for a new one.
    ///
    /// The cache lock is held across the exchange so concurrent callers
    /// share a single refresh.
    async fn get_token(&self) -> Result<String, AuthError> {
        let mut cache = self.cache.lock().await;
        if cache.is_fresh(self.clock.now()) {
            debug!("Using cached ChatCBI token");
            return Ok(cache.token.clone());
        }

        let ttl = self.ttl()?;
        let token = self.exchange().await?;
        *cache = CachedToken::issued(token, self.clock.now(), ttl)
            .ok_or_else(|| AuthError::InvalidTtl(format!("{ttl} past {}", self.clock.now())))?;
        info!(expires_at = %cache.expires_at, "ChatCBI token refreshed");
        Ok(cache.token.clone())
    }

    async fn invalidate(&self) {
        *self.cache.lock().await = CachedToken::empty();
    }
}
