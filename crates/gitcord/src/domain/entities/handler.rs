//! Handler - Relay configuration for one GitLab project
//!
//! A handler is identified by an 8-character hex token that doubles as the
//! shared secret: GitLab is pointed at `/{token}/event` and anyone holding
//! the token may edit the configuration. The record itself is a small
//! key-value entry: target Discord URL, enabled flag and the per-event
//! message templates.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use uuid::Uuid;

use crate::template::TemplateSet;

static TOKEN_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[0-9a-f]{8}$").expect("token pattern compiles"));

/// Relay configuration stored per handler token.
///
/// Serialized camelCase to stay wire-compatible with existing dashboard
/// clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handler {
    /// 8 hex characters, the public identifier and capability token.
    pub id: String,
    /// Template dictionary keyed by event kind (plus array sub-paths).
    #[serde(default)]
    pub templates: TemplateSet,
    /// Outbound Discord webhook URL.
    pub discord_url: String,
    /// Disabled handlers reject incoming events without forwarding.
    pub enabled: bool,
    pub created: DateTime<Utc>,
}

impl Handler {
    /// Create an enabled handler with a fresh token and no templates.
    pub fn new(discord_url: impl Into<String>) -> Self {
        Self {
            id: generate_token(),
            templates: TemplateSet::default(),
            discord_url: discord_url.into(),
            enabled: true,
            created: Utc::now(),
        }
    }

    /// Whether `token` is a well-formed handler token (8 lowercase hex
    /// characters, anchored).
    pub fn is_valid_token(token: &str) -> bool {
        TOKEN_FORMAT.is_match(token)
    }
}

fn generate_token() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_handler_has_valid_token() {
        let handler = Handler::new("https://discord.com/api/webhooks/1/abc");
        assert!(Handler::is_valid_token(&handler.id));
        assert!(handler.enabled);
        assert!(handler.templates.is_empty());
    }

    #[test]
    fn test_token_format_is_anchored() {
        assert!(Handler::is_valid_token("0123abcd"));
        assert!(!Handler::is_valid_token("0123ABCD"));
        assert!(!Handler::is_valid_token("0123abc"));
        assert!(!Handler::is_valid_token("x0123abcdx"));
        assert!(!Handler::is_valid_token("0123abcd0123abcd"));
        assert!(!Handler::is_valid_token(""));
    }

    #[test]
    fn test_serializes_camel_case() {
        let handler = Handler::new("https://example.com/hook");
        let value = serde_json::to_value(&handler).unwrap();
        assert!(value.get("discordUrl").is_some());
        assert!(value.get("discord_url").is_none());
    }
}
