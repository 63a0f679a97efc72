//! OpenTok server-side SDK
//!
//! Creates signed client tokens for video sessions hosted on the OpenTok
//! platform. All media routing, recording, and enforcement happens on the
//! platform; this crate is the credential side: it binds session ids to
//! account credentials and mints signed, expiring, role-carrying tokens in
//! the platform's two wire formats (legacy `T1==` and JWT).

pub mod client;
pub mod credentials;
pub mod error;
pub mod role;
pub mod session;
pub mod token;

pub use client::OpenTok;
pub use credentials::AccountCredentials;
pub use error::{OpenTokError, Result};
pub use role::Role;
pub use session::{ArchiveMode, MediaMode, Session, SessionOptions};
pub use token::{TokenFormat, TokenOptions};
