//! Token roles
//!
//! A role is the capability level embedded in a token and enforced by the
//! platform when the client connects:
//! - `subscriber`: can only subscribe to streams
//! - `publisher`: can publish, subscribe, and signal
//! - `moderator`: publisher privileges plus force-unpublish/force-disconnect

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::OpenTokError;

/// Capability level carried by a token
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Can only subscribe to streams
    Subscriber,
    /// Can publish streams, subscribe to streams, and signal
    #[default]
    Publisher,
    /// Publisher privileges plus moderation calls
    Moderator,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Subscriber => write!(f, "subscriber"),
            Role::Publisher => write!(f, "publisher"),
            Role::Moderator => write!(f, "moderator"),
        }
    }
}

impl FromStr for Role {
    type Err = OpenTokError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::token::validate::role(s)
    }
}
