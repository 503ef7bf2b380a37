use chrono::{DateTime, Duration, Utc};

/// Tokens closer than this to expiry are refreshed before use.
pub const REFRESH_MARGIN_SECS: i64 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl CachedToken {
    /// The sentinel held before the first successful exchange.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            token: String::new(),
            expires_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    /// Returns `None` when `now + ttl` is not a representable timestamp.
    #[must_use]
    pub fn issued(token: String, now: DateTime<Utc>, ttl: Duration) -> Option<Self> {
        Some(Self {
            token,
            expires_at: now.checked_add_signed(ttl)?,
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.token.is_empty()
    }

    /// True when the token can be handed out without a refresh.
    #[must_use]
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        !self.is_empty() && self.expires_at - now > Duration::seconds(REFRESH_MARGIN_SECS)
    }
}

impl Default for CachedToken {
    fn default() -> Self {
        Self::empty()
    }
}
