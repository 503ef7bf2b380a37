use thiserror::Error;

/// Hint appended to authorization failure diagnostics.
pub const AUTH_HINT: &str = "Check CBI_CLIENT_ID / CBI_CLIENT_SECRET and tenant host \
     (api.cbinsights.com vs eu-api.cbinsights.com).";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Failed to obtain token ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("Failed to send authorization request: {0}")]
    Http(String),

    #[error("Failed to parse authorization response: {0}")]
    Parse(String),

    #[error("Authorization response did not contain a token")]
    MissingToken,

    #[error("Token lifetime is out of range: {0}")]
    InvalidTtl(String),
}

impl AuthError {
    /// HTTP status of the rejected exchange, if the endpoint answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            AuthError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(error: reqwest::Error) -> Self {
        AuthError::Http(error.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ChatRequestError {
    #[error("Message is required")]
    EmptyQuestion,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Request failed ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("Failed to send chat request: {0}")]
    Http(String),

    #[error("Failed to parse chat response: {reason}")]
    Parse { status: u16, reason: String },
}

impl ChatRequestError {
    /// Numeric code reported in an error-tagged result.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            ChatRequestError::EmptyQuestion => 400,
            ChatRequestError::Auth(auth) => auth.status().unwrap_or(500),
            ChatRequestError::Status { status, .. } | ChatRequestError::Parse { status, .. } => {
                *status
            }
            ChatRequestError::Http(_) => 500,
        }
    }
}

impl From<reqwest::Error> for ChatRequestError {
    fn from(error: reqwest::Error) -> Self {
        ChatRequestError::Http(error.to_string())
    }
}

#[derive(Debug, Error)]
pub enum TrendsError {
    #[error("Failed to query ChatCBI for trends: {0}")]
    Chat(#[from] ChatRequestError),

    #[error("Failed to write trends snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize trends snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
}
