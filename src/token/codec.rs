//! Token encoding
//!
//! Two wire formats are produced:
//! - `T1==` : legacy format, an HMAC-SHA1-signed `key=value` claims string
//!   wrapped in URL-safe base64. Byte layout is fixed by already-deployed
//!   verifiers: field order, delimiters, and alphabet all matter.
//! - JWT    : compact HMAC-SHA256 JWS, the default for new integrations.

use base64::{engine::general_purpose::URL_SAFE, Engine};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::credentials::AccountCredentials;
use crate::error::{OpenTokError, Result};
use crate::role::Role;
use crate::token::options::TokenOptions;
use crate::token::{signing, validate};

/// Sentinel prefix of a legacy token
pub const LEGACY_TOKEN_SENTINEL: &str = "T1==";

/// Lifetime of an account-to-platform token
pub const PROJECT_TOKEN_TTL: u64 = 300;

const PROJECT_ISSUER_TYPE: &str = "project";

/// Which wire format to emit.
///
/// The two encoders are interchangeable strategies; the format is picked by
/// explicit configuration, never inferred from the claims.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TokenFormat {
    /// `T1==`-prefixed HMAC-SHA1 format, kept for compatibility with
    /// deployed verifiers
    Legacy,
    /// Compact HMAC-SHA256 JWS
    #[default]
    Jwt,
}

/// A validated claim set, ready to sign.
///
/// Constructed through [`TokenClaims::new`], which applies every constraint
/// exactly once. `create_time` and `nonce` are plain inputs here so callers
/// (and tests) control them; [`crate::Session::generate_token`] feeds in the
/// system clock and a fresh random nonce.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    session_id: String,
    role: Role,
    create_time: u64,
    nonce: u32,
    expire_time: u64,
    connection_data: Option<String>,
    initial_layout_class_list: Option<Vec<String>>,
}

impl TokenClaims {
    /// Assemble claims from options, resolving the expiry default and
    /// checking the expiry window and connection-data length.
    pub fn new(
        session_id: impl Into<String>,
        options: &TokenOptions,
        create_time: u64,
        nonce: u32,
    ) -> Result<Self> {
        let session_id = session_id.into();
        if session_id.is_empty() {
            return Err(OpenTokError::InvalidArgument(
                "session id cannot be empty".to_string(),
            ));
        }

        let expire_time = validate::expire_time(options.expire_time.unwrap_or(0), create_time)?;
        if let Some(data) = &options.data {
            validate::connection_data(data)?;
        }

        Ok(Self {
            session_id,
            role: options.role,
            create_time,
            nonce,
            expire_time,
            connection_data: options.data.clone(),
            initial_layout_class_list: options.initial_layout_class_list.clone(),
        })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn create_time(&self) -> u64 {
        self.create_time
    }

    pub fn nonce(&self) -> u32 {
        self.nonce
    }

    /// The resolved expiry (defaults already applied)
    pub fn expire_time(&self) -> u64 {
        self.expire_time
    }

    pub fn connection_data(&self) -> Option<&str> {
        self.connection_data.as_deref()
    }
}

/// JWS payload for a session token
#[derive(Debug, Serialize, Deserialize)]
struct SessionTokenClaims {
    iss: String,
    iat: u64,
    exp: u64,
    sid: String,
    role: Role,
    nonce: u32,
    #[serde(rename = "connectionData", skip_serializing_if = "Option::is_none")]
    connection_data: Option<String>,
    #[serde(rename = "initialLayoutClassList", skip_serializing_if = "Option::is_none")]
    initial_layout_class_list: Option<String>,
}

/// JWS payload for an account-to-platform token
#[derive(Debug, Serialize, Deserialize)]
struct ProjectTokenClaims {
    iss: String,
    ist: String,
    iat: u64,
    exp: u64,
    jti: String,
}

/// Encode a claim set in the requested format
pub fn encode(
    claims: &TokenClaims,
    credentials: &AccountCredentials,
    format: TokenFormat,
) -> Result<String> {
    match format {
        TokenFormat::Legacy => encode_legacy(claims, credentials),
        TokenFormat::Jwt => encode_jwt(claims, credentials),
    }
}

/// Encode the legacy `T1==` format.
///
/// The claims string is `session_id=..&create_time=..&nonce=..&role=..&
/// expire_time=..[&connection_data=..]` in exactly that order, with the
/// connection data percent-encoded. The signature is lowercase hex
/// HMAC-SHA1 of the claims string under the account secret.
pub fn encode_legacy(claims: &TokenClaims, credentials: &AccountCredentials) -> Result<String> {
    let mut data = format!(
        "session_id={}&create_time={}&nonce={}&role={}&expire_time={}",
        claims.session_id, claims.create_time, claims.nonce, claims.role, claims.expire_time
    );
    if let Some(connection_data) = &claims.connection_data {
        data.push_str("&connection_data=");
        data.push_str(&urlencoding::encode(connection_data));
    }

    let sig = signing::hmac_sha1_hex(credentials.api_secret().as_bytes(), data.as_bytes())?;
    let inner = format!("partner_id={}&sig={}:{}", credentials.api_key(), sig, data);

    // URL-safe alphabet, padding kept: standard base64 with +/ mapped to -_
    Ok(format!("{}{}", LEGACY_TOKEN_SENTINEL, URL_SAFE.encode(inner)))
}

/// Encode the compact JWS format, signed HMAC-SHA256 with the account
/// secret as a raw byte key.
pub fn encode_jwt(claims: &TokenClaims, credentials: &AccountCredentials) -> Result<String> {
    let payload = SessionTokenClaims {
        iss: credentials.api_key().to_string(),
        iat: claims.create_time,
        exp: claims.expire_time,
        sid: claims.session_id.clone(),
        role: claims.role,
        nonce: claims.nonce,
        connection_data: claims.connection_data.clone(),
        initial_layout_class_list: claims
            .initial_layout_class_list
            .as_ref()
            .map(|classes| classes.join(" ")),
    };
    sign_jws(&payload, credentials)
}

/// Generate the account-to-platform token used to authenticate REST calls.
///
/// Structurally the JWS session token minus `sid`/`role`/`connectionData`,
/// with a fixed 5-minute expiry and a fresh `jti`.
pub fn project_token(credentials: &AccountCredentials) -> Result<String> {
    let now = unix_time();
    let payload = ProjectTokenClaims {
        iss: credentials.api_key().to_string(),
        ist: PROJECT_ISSUER_TYPE.to_string(),
        iat: now,
        exp: now + PROJECT_TOKEN_TTL,
        jti: Uuid::new_v4().to_string(),
    };
    sign_jws(&payload, credentials)
}

fn sign_jws<T: Serialize>(payload: &T, credentials: &AccountCredentials) -> Result<String> {
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        payload,
        &jsonwebtoken::EncodingKey::from_secret(credentials.api_secret().as_bytes()),
    )
    .map_err(|e| OpenTokError::Signing(e.to_string()))
}

/// Seconds since the UNIX epoch
pub(crate) fn unix_time() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CREATE_TIME: u64 = 1_700_000_000;
    const NONCE: u32 = 439_108_185;

    fn credentials() -> AccountCredentials {
        AccountCredentials::new(123456, "0123456789abcdef0123456789abcdef01234567")
    }

    fn claims(options: &TokenOptions) -> TokenClaims {
        TokenClaims::new("2_fakesession", options, CREATE_TIME, NONCE).unwrap()
    }

    #[test]
    fn test_claims_default_expiry() {
        let c = claims(&TokenOptions::new());
        assert_eq!(c.expire_time(), CREATE_TIME + 86_400);
        assert_eq!(c.create_time(), CREATE_TIME);
        assert_eq!(c.nonce(), NONCE);
        assert_eq!(c.role(), Role::Publisher);
    }

    #[test]
    fn test_claims_reject_empty_session() {
        let result = TokenClaims::new("", &TokenOptions::new(), CREATE_TIME, NONCE);
        assert!(matches!(result, Err(OpenTokError::InvalidArgument(_))));
    }

    #[test]
    fn test_claims_reject_oversized_data() {
        let options = TokenOptions::new().data("x".repeat(1001));
        let result = TokenClaims::new("2_fakesession", &options, CREATE_TIME, NONCE);
        assert!(matches!(result, Err(OpenTokError::InvalidArgument(_))));
    }

    #[test]
    fn test_legacy_claims_string_layout() {
        let token = encode_legacy(&claims(&TokenOptions::new()), &credentials()).unwrap();
        assert!(token.starts_with(LEGACY_TOKEN_SENTINEL));

        let inner = URL_SAFE
            .decode(&token[LEGACY_TOKEN_SENTINEL.len()..])
            .unwrap();
        let inner = String::from_utf8(inner).unwrap();
        let (meta, data) = inner.split_once(':').unwrap();

        assert!(meta.starts_with("partner_id=123456&sig="));
        assert_eq!(
            data,
            format!(
                "session_id=2_fakesession&create_time={}&nonce={}&role=publisher&expire_time={}",
                CREATE_TIME,
                NONCE,
                CREATE_TIME + 86_400
            )
        );
    }

    #[test]
    fn test_legacy_signature_verifies() {
        let token = encode_legacy(&claims(&TokenOptions::new()), &credentials()).unwrap();
        let inner = URL_SAFE
            .decode(&token[LEGACY_TOKEN_SENTINEL.len()..])
            .unwrap();
        let inner = String::from_utf8(inner).unwrap();
        let (meta, data) = inner.split_once(':').unwrap();
        let sig = meta.split_once("&sig=").unwrap().1;

        let expected =
            signing::hmac_sha1_hex(credentials().api_secret().as_bytes(), data.as_bytes()).unwrap();
        assert_eq!(sig, expected);
    }

    #[test]
    fn test_legacy_connection_data_percent_encoded() {
        let options = TokenOptions::new().data("name=alice&mood=100%");
        let token = encode_legacy(&claims(&options), &credentials()).unwrap();

        let inner = URL_SAFE
            .decode(&token[LEGACY_TOKEN_SENTINEL.len()..])
            .unwrap();
        let inner = String::from_utf8(inner).unwrap();
        let (_, data) = inner.split_once(':').unwrap();

        assert!(data.ends_with("&connection_data=name%3Dalice%26mood%3D100%25"));
    }

    #[test]
    fn test_jwt_three_part_shape() {
        let token = encode_jwt(&claims(&TokenOptions::new()), &credentials()).unwrap();
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_jwt_omits_unset_optional_claims() {
        use base64::engine::general_purpose::URL_SAFE_NO_PAD;

        let token = encode_jwt(&claims(&TokenOptions::new()), &credentials()).unwrap();
        let payload = token.split('.').nth(1).unwrap();
        let payload = String::from_utf8(URL_SAFE_NO_PAD.decode(payload).unwrap()).unwrap();

        assert!(!payload.contains("connectionData"));
        assert!(!payload.contains("initialLayoutClassList"));
        assert!(payload.contains("\"sid\":\"2_fakesession\""));
    }

    #[test]
    fn test_jwt_layout_classes_space_joined() {
        use base64::engine::general_purpose::URL_SAFE_NO_PAD;

        let options = TokenOptions::new()
            .initial_layout_class_list(vec!["focus".to_string(), "full".to_string()]);
        let token = encode_jwt(&claims(&options), &credentials()).unwrap();
        let payload = token.split('.').nth(1).unwrap();
        let payload = String::from_utf8(URL_SAFE_NO_PAD.decode(payload).unwrap()).unwrap();

        assert!(payload.contains("\"initialLayoutClassList\":\"focus full\""));
    }

    #[test]
    fn test_encode_dispatch() {
        let c = claims(&TokenOptions::new());
        let legacy = encode(&c, &credentials(), TokenFormat::Legacy).unwrap();
        let jwt = encode(&c, &credentials(), TokenFormat::Jwt).unwrap();
        assert!(legacy.starts_with(LEGACY_TOKEN_SENTINEL));
        assert_eq!(jwt.split('.').count(), 3);
    }
}
