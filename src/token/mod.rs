//! Token generation and signing
//!
//! Token formats:
//! - `T1==` prefix: legacy HMAC-SHA1-signed claims string (backward
//!   compatible with deployed verifiers)
//! - JWT: compact HMAC-SHA256 JWS, the default for new integrations
//!
//! Pipeline: options are assembled into a validated [`TokenClaims`] value,
//! then encoded and signed in the chosen [`TokenFormat`].

mod codec;
mod options;
mod signing;

pub mod validate;

pub use codec::{
    encode, encode_jwt, encode_legacy, project_token, TokenClaims, TokenFormat,
    LEGACY_TOKEN_SENTINEL, PROJECT_TOKEN_TTL,
};
pub use options::TokenOptions;
pub use signing::{hmac_sha1_hex, hmac_sha256};

pub(crate) use codec::unix_time;
