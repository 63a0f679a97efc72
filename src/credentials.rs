//! Account credentials

use std::fmt;

/// The API key/secret pair for an OpenTok account.
///
/// The secret is only ever used locally to sign tokens; it is never
/// transmitted. Shared read-only between the facade, sessions, and the
/// token codec.
#[derive(Clone)]
pub struct AccountCredentials {
    api_key: u32,
    api_secret: String,
}

impl AccountCredentials {
    /// Create credentials. Surrounding whitespace in the secret (a common
    /// copy/paste artifact) is trimmed on ingestion.
    pub fn new(api_key: u32, api_secret: impl Into<String>) -> Self {
        Self {
            api_key,
            api_secret: api_secret.into().trim().to_string(),
        }
    }

    /// The account's API key (also called the partner id).
    pub fn api_key(&self) -> u32 {
        self.api_key
    }

    /// The signing secret (for internal use)
    pub fn api_secret(&self) -> &str {
        &self.api_secret
    }
}

impl fmt::Debug for AccountCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountCredentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}
