//! Handler DTOs

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use gitcord::Handler;

/// Request to create a handler or change its Discord URL
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiscordUrlRequest {
    /// Target Discord webhook URL
    pub discord_url: Option<String>,
}

/// Request to set or clear one template entry
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTemplateRequest {
    /// Template key (event kind, optionally dotted with an array path)
    #[serde(rename = "type")]
    pub template_type: Option<String>,
    /// Template string; empty or absent removes the entry
    pub template: Option<String>,
}

/// Success envelope carrying a handler record
#[derive(Debug, Serialize, ToSchema)]
pub struct HandlerEnvelope {
    pub error: bool,
    pub status: u16,
    #[schema(value_type = Object)]
    pub handler: Handler,
}

impl HandlerEnvelope {
    pub fn new(handler: Handler) -> Self {
        Self {
            error: false,
            status: 200,
            handler,
        }
    }
}

/// Success envelope with a plain message
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageEnvelope {
    pub error: bool,
    pub status: u16,
    pub message: String,
}

impl MessageEnvelope {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            error: false,
            status: 200,
            message: message.into(),
        }
    }
}

/// Delivery acknowledgement for event and test requests.
///
/// Downstream delivery failures are reported with HTTP 400 but
/// `error: false`: the request itself was fine, Discord was not. The
/// envelope's own `status` field drives the HTTP status code.
#[derive(Debug, Serialize, ToSchema)]
pub struct AckEnvelope {
    pub error: bool,
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl AckEnvelope {
    pub fn delivered(message: impl Into<String>) -> Self {
        Self {
            error: false,
            status: 200,
            message: message.into(),
            body: None,
        }
    }

    pub fn undelivered(message: impl Into<String>) -> Self {
        Self {
            error: false,
            status: 400,
            message: message.into(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }
}

impl IntoResponse for AckEnvelope {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::BAD_REQUEST);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_envelope_serializes_handler_inline() {
        let envelope = HandlerEnvelope::new(Handler::new("https://discord.com/api/webhooks/1/a"));
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["error"], serde_json::json!(false));
        assert_eq!(value["status"], serde_json::json!(200));
        assert!(value["handler"]["id"].is_string());
        assert_eq!(value["handler"]["enabled"], serde_json::json!(true));
        assert_eq!(value["handler"]["templates"], serde_json::json!({}));
    }

    #[test]
    fn test_ack_envelope_omits_empty_body() {
        let ack = AckEnvelope::delivered("Event forwarded to Discord successfully!");
        let value = serde_json::to_value(&ack).unwrap();
        assert!(value.get("body").is_none());

        let ack = AckEnvelope::undelivered("Request to Discord failed with status code: 401")
            .with_body("{\"message\": \"Invalid Webhook Token\"}".to_string());
        let value = serde_json::to_value(&ack).unwrap();
        assert_eq!(value["status"], serde_json::json!(400));
        assert_eq!(value["error"], serde_json::json!(false));
        assert!(value["body"].is_string());
    }

    #[test]
    fn test_template_request_maps_type_field() {
        let req: UpdateTemplateRequest =
            serde_json::from_str(r#"{"type": "push", "template": "{{ref}}"}"#).unwrap();
        assert_eq!(req.template_type.as_deref(), Some("push"));
        assert_eq!(req.template.as_deref(), Some("{{ref}}"));
    }
}
