//! Sessions and session-id validation
//!
//! A session id is an opaque, platform-issued string. Its payload is a
//! version prefix followed by URL-safe base64 over `~`-separated fields,
//! one of which is the api key of the account that created the session.
//! That embedded key is the only integrity anchor available client-side:
//! token generation checks it as a sanity guard, while real enforcement
//! happens on the platform when the token is redeemed.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use rand::Rng;
use tracing::debug;

use crate::credentials::AccountCredentials;
use crate::error::{OpenTokError, Result};
use crate::token::{self, TokenClaims, TokenFormat, TokenOptions};

/// Platform-issued ids are emitted without base64 padding; accept both.
const LENIENT_STANDARD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// How streams are routed between session participants
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MediaMode {
    /// Streams go directly between clients, falling back to TURN relay
    #[default]
    Relayed,
    /// Streams go through the platform's media router
    Routed,
}

/// When the platform records the session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ArchiveMode {
    /// Recording is started and stopped explicitly
    #[default]
    Manual,
    /// The session is recorded for as long as it has streams
    Always,
}

/// Options a session was created with
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Stream routing mode
    pub media_mode: MediaMode,

    /// Recording mode
    pub archive_mode: ArchiveMode,

    /// Location hint: an IP address close to the session's participants
    pub location: Option<String>,
}

impl SessionOptions {
    /// Options with the defaults: relayed media, manual archiving, no
    /// location hint
    pub fn new() -> Self {
        Self::default()
    }

    /// Route streams through the media router
    pub fn media_mode(mut self, media_mode: MediaMode) -> Self {
        self.media_mode = media_mode;
        self
    }

    /// Set the recording mode
    pub fn archive_mode(mut self, archive_mode: ArchiveMode) -> Self {
        self.archive_mode = archive_mode;
        self
    }

    /// Set the location hint
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// A session bound to the account credentials that created it.
///
/// Immutable once constructed; typically held only long enough to mint
/// tokens. Whether the session id really belongs to the credentials is
/// checked when a token is generated, so a bad id surfaces as a
/// token-generation error rather than a construction error.
#[derive(Debug, Clone)]
pub struct Session {
    session_id: String,
    credentials: AccountCredentials,
    options: SessionOptions,
}

impl Session {
    pub(crate) fn new(
        session_id: impl Into<String>,
        credentials: AccountCredentials,
        options: SessionOptions,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            credentials,
            options,
        }
    }

    /// The session id, which uniquely identifies the session
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// The api key the session is bound to
    pub fn api_key(&self) -> u32 {
        self.credentials.api_key()
    }

    /// The options the session was created with
    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Generate a signed token for this session in the default format
    /// (JWT). See [`Session::generate_token_with`].
    pub fn generate_token(&self, options: &TokenOptions) -> Result<String> {
        self.generate_token_with(options, TokenFormat::default())
    }

    /// Generate a signed token for this session.
    ///
    /// Validates that the session id decodes and embeds this account's api
    /// key, then assembles the claims (stamping the current time and a
    /// fresh nonce) and signs them in the requested format.
    pub fn generate_token_with(
        &self,
        options: &TokenOptions,
        format: TokenFormat,
    ) -> Result<String> {
        if self.session_id.is_empty() {
            return Err(OpenTokError::InvalidArgument(
                "session id cannot be empty".to_string(),
            ));
        }

        let fields = decode_session_id(&self.session_id)?;
        let api_key = self.credentials.api_key().to_string();
        if !fields.iter().any(|field| *field == api_key) {
            return Err(OpenTokError::InvalidArgument(format!(
                "session id does not belong to account {}",
                api_key
            )));
        }

        let claims = TokenClaims::new(
            &self.session_id,
            options,
            token::unix_time(),
            rand::rng().random(),
        )?;

        debug!(
            session_id = %self.session_id,
            role = %claims.role(),
            ?format,
            "generating session token"
        );
        token::encode(&claims, &self.credentials, format)
    }
}

/// Decode a session id into its `~`-separated fields.
///
/// Mirrors the platform's encoding: a two-character version prefix, then
/// base64 with `-` and `_` standing in for `+` and `/`.
fn decode_session_id(session_id: &str) -> Result<Vec<String>> {
    let invalid = || OpenTokError::InvalidArgument("session id is not valid".to_string());

    let encoded = session_id.get(2..).ok_or_else(invalid)?;
    let encoded = encoded.replace('-', "+").replace('_', "/");
    let decoded = LENIENT_STANDARD.decode(encoded).map_err(|_| invalid())?;
    let decoded = String::from_utf8(decoded).map_err(|_| invalid())?;

    Ok(decoded.split('~').map(String::from).collect())
}
