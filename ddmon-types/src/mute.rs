//! Request bodies for scoped mute and unmute.
//!
//! These are only ever sent; the service never returns them.

use serde::{Deserialize, Serialize};

/// Which scope of a monitor to mute, and until when.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MuteMonitorScope {
    /// Scope to mute, e.g. `role:db`. Unset mutes the whole monitor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    /// Unix time the mute ends. Unset mutes until unmuted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
}

impl MuteMonitorScope {
    /// Mute `scope` until it is unmuted.
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: Some(scope.into()),
            end: None,
        }
    }

    /// End the mute at the unix time `end`.
    pub fn until(mut self, end: i64) -> Self {
        self.end = Some(end);
        self
    }
}

/// Which scope (or all scopes) of a monitor to unmute.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UnmuteMonitorScopes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_scopes: Option<bool>,
}

impl UnmuteMonitorScopes {
    /// Unmute a single scope.
    pub fn scope(scope: impl Into<String>) -> Self {
        Self {
            scope: Some(scope.into()),
            all_scopes: None,
        }
    }

    /// Unmute every muted scope of the monitor.
    pub fn all() -> Self {
        Self {
            scope: None,
            all_scopes: Some(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mute_scope_without_end() {
        let body = MuteMonitorScope::new("host:web-1");
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"scope":"host:web-1"}"#
        );
    }

    #[test]
    fn mute_scope_with_end() {
        let body = MuteMonitorScope::new("role:db").until(1700000000);
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"scope":"role:db","end":1700000000}"#
        );
    }

    #[test]
    fn unmute_all_scopes() {
        assert_eq!(
            serde_json::to_string(&UnmuteMonitorScopes::all()).unwrap(),
            r#"{"all_scopes":true}"#
        );
        assert_eq!(
            serde_json::to_string(&UnmuteMonitorScopes::scope("env:dev")).unwrap(),
            r#"{"scope":"env:dev"}"#
        );
    }

    #[test]
    fn explicit_false_all_scopes_is_sent() {
        let body = UnmuteMonitorScopes {
            scope: Some("env:dev".to_string()),
            all_scopes: Some(false),
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"scope":"env:dev","all_scopes":false}"#
        );
    }
}
