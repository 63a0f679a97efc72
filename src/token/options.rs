//! Configuration for token generation

use crate::role::Role;

/// Options for a generated token.
///
/// Constraints are checked when the token is generated, not here, so an
/// options value can be built once and reused across many sessions.
#[derive(Debug, Clone, Default)]
pub struct TokenOptions {
    /// Capability level embedded in the token
    pub role: Role,

    /// Expiry as seconds since the UNIX epoch. `None` means the default of
    /// 24 hours after the token's creation time. The maximum is 30 days
    /// after creation time.
    pub expire_time: Option<u64>,

    /// Connection metadata describing the end user (user id, display name,
    /// and so on). Limited to 1000 characters; cannot be updated once set.
    pub data: Option<String>,

    /// Initial layout classes for streams published by this client.
    /// Only carried by the JWT encoding.
    pub initial_layout_class_list: Option<Vec<String>>,
}

impl TokenOptions {
    /// Options with the defaults: publisher role, 24-hour expiry, no
    /// connection data
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the role
    pub fn role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Set an explicit expiry time (seconds since the UNIX epoch)
    pub fn expire_time(mut self, expire_time: u64) -> Self {
        self.expire_time = Some(expire_time);
        self
    }

    /// Attach connection metadata
    pub fn data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Set the initial layout class list
    pub fn initial_layout_class_list(mut self, classes: Vec<String>) -> Self {
        self.initial_layout_class_list = Some(classes);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = TokenOptions::new();
        assert_eq!(options.role, Role::Publisher);
        assert_eq!(options.expire_time, None);
        assert_eq!(options.data, None);
        assert_eq!(options.initial_layout_class_list, None);
    }

    #[test]
    fn test_setters_chain() {
        let options = TokenOptions::new()
            .role(Role::Moderator)
            .expire_time(1_700_003_600)
            .data("name=alice")
            .initial_layout_class_list(vec!["focus".to_string(), "full".to_string()]);

        assert_eq!(options.role, Role::Moderator);
        assert_eq!(options.expire_time, Some(1_700_003_600));
        assert_eq!(options.data.as_deref(), Some("name=alice"));
        assert_eq!(
            options.initial_layout_class_list,
            Some(vec!["focus".to_string(), "full".to_string()])
        );
    }
}
