//! Constraint checks applied before a token is signed
//!
//! Both token encodings share these rules; each claim set passes through
//! them exactly once, when the claims are assembled.

use crate::error::{OpenTokError, Result};
use crate::role::Role;

/// Default token lifetime when the caller leaves the expiry unset
pub const DEFAULT_TOKEN_TTL: u64 = 86_400;

/// Longest allowed token lifetime, measured from validation time
pub const MAX_TOKEN_TTL: u64 = 30 * 86_400;

/// Longest allowed connection data, in characters before escaping
pub const MAX_CONNECTION_DATA_CHARS: usize = 1000;

/// Resolve and bound an expiry time against `now`.
///
/// `0` is the unset sentinel and resolves to `now + 86400`. An explicit
/// expiry must fall inside `[now - 1, now + 30 days]`, both ends inclusive;
/// the one-second grace below `now` absorbs clock skew between the caller
/// and this check.
pub fn expire_time(expire: u64, now: u64) -> Result<u64> {
    if expire == 0 {
        return Ok(now + DEFAULT_TOKEN_TTL);
    }
    if expire < now.saturating_sub(1) {
        return Err(OpenTokError::InvalidArgument(format!(
            "expire time must be in the future: {} seconds in the past",
            now - expire
        )));
    }
    if expire > now + MAX_TOKEN_TTL {
        return Err(OpenTokError::InvalidArgument(format!(
            "expire time must be within the next 30 days: {} seconds over",
            expire - (now + MAX_TOKEN_TTL)
        )));
    }
    Ok(expire)
}

/// Bound the connection data length. The limit counts characters of the
/// raw string, before any percent-encoding.
pub fn connection_data(data: &str) -> Result<()> {
    let len = data.chars().count();
    if len > MAX_CONNECTION_DATA_CHARS {
        return Err(OpenTokError::InvalidArgument(format!(
            "connection data is too long, limit is {} characters: {}",
            MAX_CONNECTION_DATA_CHARS, len
        )));
    }
    Ok(())
}

/// Parse a role string as the legacy string-based variant requires: an
/// exact match on one of the three known lowercase names.
pub fn role(s: &str) -> Result<Role> {
    match s {
        "subscriber" => Ok(Role::Subscriber),
        "publisher" => Ok(Role::Publisher),
        "moderator" => Ok(Role::Moderator),
        _ => Err(OpenTokError::InvalidArgument(format!(
            "'{}' is not a recognized role",
            s
        ))),
    }
}
