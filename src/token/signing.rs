//! HMAC signing primitives
//!
//! Isolates the cryptographic primitive from the token encoding logic.
//! The legacy format signs with HMAC-SHA1 rendered as lowercase hex; the
//! JWS format signs with HMAC-SHA256 over raw bytes.

use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::Sha256;

use crate::error::{OpenTokError, Result};

type HmacSha1 = Hmac<Sha1>;
type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA1 over `data`, rendered as lowercase hex
pub fn hmac_sha1_hex(key: &[u8], data: &[u8]) -> Result<String> {
    let mut mac =
        HmacSha1::new_from_slice(key).map_err(|e| OpenTokError::Signing(e.to_string()))?;
    mac.update(data);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// HMAC-SHA256 over `data`, as raw bytes
pub fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    let mut mac =
        HmacSha256::new_from_slice(key).map_err(|e| OpenTokError::Signing(e.to_string()))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}
