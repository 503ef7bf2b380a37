use secrecy::{ExposeSecret, SecretString};
use std::env;
use std::time::Duration;
use url::Url;

use crate::errors::ConfigError;

pub const US_BASE_URL: &str = "https://api.cbinsights.com/v2";
pub const EU_BASE_URL: &str = "https://eu-api.cbinsights.com/v2";

const DEFAULT_AUTH_TIMEOUT_SECS: u64 = 10;
const DEFAULT_CHAT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;
const MAX_TOKEN_TTL_SECS: u64 = 30 * 24 * 3600;

/// Tenant region; selects the API host when no explicit base URL is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Region {
    #[default]
    Us,
    Eu,
}

impl Region {
    #[must_use]
    pub fn base_url(self) -> &'static str {
        match self {
            Region::Us => US_BASE_URL,
            Region::Eu => EU_BASE_URL,
        }
    }
}

impl std::str::FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "us" => Ok(Region::Us),
            "eu" => Ok(Region::Eu),
            other => Err(format!("unknown region '{other}', expected 'us' or 'eu'")),
        }
    }
}

#[derive(Debug)]
pub struct CbiConfig {
    pub client_id: String,
    pub client_secret: SecretString,
    pub base_url: Url,
    pub auth_timeout: Duration,
    pub chat_timeout: Duration,
    pub token_ttl: Duration,
}

impl CbiConfig {
    /// # Errors
    ///
    /// Returns an error if either credential is empty.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let client_id = client_id.into();
        let client_secret = client_secret.into();
        if client_id.trim().is_empty() {
            return Err(ConfigError::Missing("CBI_CLIENT_ID"));
        }
        if client_secret.trim().is_empty() {
            return Err(ConfigError::Missing("CBI_CLIENT_SECRET"));
        }

        Ok(Self {
            client_id,
            client_secret: SecretString::from(client_secret),
            base_url: parse_base_url(Region::Us.base_url())?,
            auth_timeout: Duration::from_secs(DEFAULT_AUTH_TIMEOUT_SECS),
            chat_timeout: Duration::from_secs(DEFAULT_CHAT_TIMEOUT_SECS),
            token_ttl: Duration::from_secs(DEFAULT_TOKEN_TTL_SECS),
        })
    }

    /// # Errors
    ///
    /// Returns an error if the URL is not an absolute http(s) URL.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }

    #[must_use]
    pub fn with_region(mut self, region: Region) -> Self {
        // Region hosts are compile-time constants and always parse.
        if let Ok(url) = parse_base_url(region.base_url()) {
            self.base_url = url;
        }
        self
    }

    #[must_use]
    pub fn with_auth_timeout(mut self, timeout: Duration) -> Self {
        self.auth_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_chat_timeout(mut self, timeout: Duration) -> Self {
        self.chat_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    /// Reads the `CBI_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if credentials are missing or any value is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup, e.g. a map in tests.
    ///
    /// # Errors
    ///
    /// Returns an error if credentials are missing or any value is malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let client_id = lookup("CBI_CLIENT_ID").ok_or(ConfigError::Missing("CBI_CLIENT_ID"))?;
        let client_secret =
            lookup("CBI_CLIENT_SECRET").ok_or(ConfigError::Missing("CBI_CLIENT_SECRET"))?;
        let mut config = Self::new(client_id, client_secret)?;

        if let Some(region) = lookup("CBI_REGION").filter(|v| !v.trim().is_empty()) {
            let region = region
                .parse::<Region>()
                .map_err(|reason| ConfigError::Invalid {
                    var: "CBI_REGION",
                    reason,
                })?;
            config = config.with_region(region);
        }

        if let Some(base) = lookup("CBI_BASE_URL").filter(|v| !v.trim().is_empty()) {
            config = config.with_base_url(&base)?;
        }

        if let Some(secs) = lookup("CBI_AUTH_TIMEOUT_SECS") {
            config.auth_timeout = parse_secs("CBI_AUTH_TIMEOUT_SECS", &secs)?;
        }
        if let Some(secs) = lookup("CBI_CHAT_TIMEOUT_SECS") {
            config.chat_timeout = parse_secs("CBI_CHAT_TIMEOUT_SECS", &secs)?;
        }
        if let Some(secs) = lookup("CBI_TOKEN_TTL_SECS") {
            let ttl = parse_secs("CBI_TOKEN_TTL_SECS", &secs)?;
            if ttl.as_secs() > MAX_TOKEN_TTL_SECS {
                return Err(ConfigError::Invalid {
                    var: "CBI_TOKEN_TTL_SECS",
                    reason: format!("must be at most {MAX_TOKEN_TTL_SECS} seconds"),
                });
            }
            config.token_ttl = ttl;
        }

        Ok(config)
    }

    #[must_use]
    pub fn authorize_url(&self) -> String {
        self.endpoint("authorize")
    }

    #[must_use]
    pub fn chat_url(&self) -> String {
        self.endpoint("chatcbi")
    }

    pub(crate) fn client_secret(&self) -> &str {
        self.client_secret.expose_secret()
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{name}", self.base_url.as_str().trim_end_matches('/'))
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::Invalid {
        var: "CBI_BASE_URL",
        reason: e.to_string(),
    })?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Invalid {
            var: "CBI_BASE_URL",
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    Ok(url)
}

fn parse_secs(var: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::Invalid {
            var,
            reason: "must be greater than zero".to_string(),
        }),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(ConfigError::Invalid {
            var,
            reason: e.to_string(),
        }),
    }
}
