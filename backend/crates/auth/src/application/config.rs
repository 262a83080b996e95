//! Application Configuration
//!
//! Configuration for the Auth application layer. Constructed once at
//! process start and injected; business logic never reads the process
//! environment directly.

use std::time::Duration;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Process-wide signing secret for bearer credentials.
    /// The process cannot serve requests without one; `main` fails
    /// at startup when it is unconfigured.
    pub token_secret: String,
    /// Credential validity window (7 days)
    pub token_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl AuthConfig {
    /// Create config with the given signing secret and default TTL
    pub fn new(token_secret: impl Into<String>) -> Self {
        Self {
            token_secret: token_secret.into(),
            token_ttl: Duration::from_secs(7 * 24 * 3600), // 7 days
            password_pepper: None,
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
