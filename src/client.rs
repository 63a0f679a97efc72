//! Top-level SDK entry point

use tracing::debug;

use crate::credentials::AccountCredentials;
use crate::error::Result;
use crate::session::{Session, SessionOptions};
use crate::token::{self, TokenFormat, TokenOptions};

/// The SDK facade: owns the account credentials and hands out sessions
/// and tokens.
///
/// # Example
///
/// ```no_run
/// use opentok::{OpenTok, Role, TokenOptions};
///
/// fn main() -> opentok::Result<()> {
///     let opentok = OpenTok::new(123456, "YOUR_API_SECRET");
///
///     // A session id issued by the platform for this account
///     let session_id = "2_MX4xMjM0NTZ-fl...";
///
///     let token = opentok.generate_token(
///         session_id,
///         &TokenOptions::new().role(Role::Moderator),
///     )?;
///     println!("{token}");
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct OpenTok {
    credentials: AccountCredentials,
}

impl OpenTok {
    /// Create a client for the given account
    pub fn new(api_key: u32, api_secret: impl Into<String>) -> Self {
        Self {
            credentials: AccountCredentials::new(api_key, api_secret),
        }
    }

    /// The account credentials this client signs with
    pub fn credentials(&self) -> &AccountCredentials {
        &self.credentials
    }

    /// Bind an existing platform-issued session id to this account's
    /// credentials for token minting
    pub fn session(&self, session_id: impl Into<String>, options: SessionOptions) -> Session {
        Session::new(session_id, self.credentials.clone(), options)
    }

    /// Generate a token for a session in the default format (JWT).
    ///
    /// Fails with an invalid-argument error if the session id is
    /// malformed or was not created by this account.
    pub fn generate_token(&self, session_id: &str, options: &TokenOptions) -> Result<String> {
        self.generate_token_with(session_id, options, TokenFormat::default())
    }

    /// Generate a token for a session in an explicit format. Use
    /// [`TokenFormat::Legacy`] when the token must be consumed by
    /// verifiers of the original `T1==` format.
    pub fn generate_token_with(
        &self,
        session_id: &str,
        options: &TokenOptions,
        format: TokenFormat,
    ) -> Result<String> {
        self.session(session_id, SessionOptions::new())
            .generate_token_with(options, format)
    }

    /// Generate the short-lived account token that authenticates
    /// server-to-platform REST calls
    pub fn project_token(&self) -> Result<String> {
        debug!(api_key = self.credentials.api_key(), "generating project token");
        token::project_token(&self.credentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OpenTokError;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;

    const SECRET: &str = "0123456789abcdef0123456789abcdef01234567";

    fn session_id_for(api_key: u32) -> String {
        format!("1_{}", URL_SAFE_NO_PAD.encode(format!("1~{}~x", api_key)))
    }

    #[test]
    fn test_generate_token_default_is_jwt() {
        let opentok = OpenTok::new(123456, SECRET);
        let token = opentok
            .generate_token(&session_id_for(123456), &TokenOptions::new())
            .unwrap();
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_generate_token_legacy_format() {
        let opentok = OpenTok::new(123456, SECRET);
        let token = opentok
            .generate_token_with(
                &session_id_for(123456),
                &TokenOptions::new(),
                TokenFormat::Legacy,
            )
            .unwrap();
        assert!(token.starts_with(token::LEGACY_TOKEN_SENTINEL));
    }

    #[test]
    fn test_generate_token_foreign_session_rejected() {
        let opentok = OpenTok::new(99, SECRET);
        let result = opentok.generate_token(&session_id_for(42), &TokenOptions::new());
        assert!(matches!(result, Err(OpenTokError::InvalidArgument(_))));
    }

    #[test]
    fn test_project_token_shape() {
        let opentok = OpenTok::new(123456, SECRET);
        let token = opentok.project_token().unwrap();
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_session_binding() {
        let opentok = OpenTok::new(7, SECRET);
        let session = opentok.session(session_id_for(7), SessionOptions::new());
        assert_eq!(session.api_key(), 7);
    }
}
