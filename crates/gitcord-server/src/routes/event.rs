//! Event Routes
//!
//! The forwarding pipeline: raw GitLab payload in, normalized event,
//! rendered template, delivery to Discord. Plus a test route that sends a
//! fixed embed so users can verify their webhook URL.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};

use gitcord::{normalize, render, DeliveryOutcome, MessageDelivery, TemplatePath};

use crate::models::{AckEnvelope, ApiError};
use crate::routes::handler::{ensure_token, find_handler};
use crate::AppState;

/// Receive a GitLab webhook event and forward it to Discord
#[utoipa::path(
    post,
    path = "/{id}/event",
    params(("id" = String, Path, description = "Handler token")),
    request_body = Value,
    responses(
        (status = 200, description = "Event forwarded", body = AckEnvelope),
        (status = 400, description = "Disabled handler, unrecognised event or delivery failure"),
        (status = 404, description = "Handler not found")
    ),
    tag = "Event"
)]
pub async fn receive_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<AckEnvelope, ApiError> {
    ensure_token(&id)?;
    let handler = find_handler(&state, &id).await?;

    if !handler.enabled {
        return Err(ApiError::bad_request("Handler is disabled"));
    }

    let Json(payload) = body.map_err(|_| ApiError::malformed_body())?;

    let event =
        normalize(&payload).map_err(|_| ApiError::bad_request("Unrecognised event type"))?;

    let kind = event.kind();
    let rendered = render(&handler.templates, &TemplatePath::root(kind), &event.to_value());

    // The renderer performs no JSON escaping; whatever it produced must
    // still parse before it can go out as a Discord message body.
    let message: Value = serde_json::from_str(&rendered)
        .map_err(|_| ApiError::bad_request("Rendered template is not valid JSON"))?;

    tracing::debug!(token = %id, %kind, "forwarding event to Discord");

    let ack = match state.discord.deliver(&handler.discord_url, &message).await {
        DeliveryOutcome::Delivered => {
            AckEnvelope::delivered("Event forwarded to Discord successfully!")
        }
        DeliveryOutcome::UnresolvedHost => {
            AckEnvelope::undelivered("The provided Discord webhook URL could not be resolved")
        }
        DeliveryOutcome::Rejected { status, body } => {
            AckEnvelope::undelivered(format!("Request to Discord failed with status code: {status}"))
                .with_body(body)
        }
        DeliveryOutcome::Failed(reason) => {
            tracing::warn!(token = %id, %reason, "delivery to Discord failed");
            AckEnvelope::undelivered("An error occurred whilst sending the event to Discord")
        }
    };

    Ok(ack)
}

fn test_message() -> Value {
    json!({
        "embeds": [
            {
                "title": "GitLab Webhook Handler - Test Request",
                "description": "If you're seeing this, your handler is setup successfully!",
                "color": 16552998
            }
        ]
    })
}

/// Send a test embed to the configured Discord webhook URL
#[utoipa::path(
    post,
    path = "/{id}/test",
    params(("id" = String, Path, description = "Handler token")),
    responses(
        (status = 200, description = "Test message sent", body = AckEnvelope),
        (status = 400, description = "Delivery failure"),
        (status = 404, description = "Handler not found")
    ),
    tag = "Event"
)]
pub async fn send_test_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<AckEnvelope, ApiError> {
    ensure_token(&id)?;

    // A disabled handler may still be tested; the flag only gates real
    // event traffic.
    let handler = find_handler(&state, &id).await?;

    let ack = match state.discord.deliver(&handler.discord_url, &test_message()).await {
        DeliveryOutcome::Delivered => AckEnvelope::delivered("Test request sent successfully"),
        DeliveryOutcome::UnresolvedHost => {
            AckEnvelope::undelivered("The provided Discord webhook URL could not be resolved")
        }
        DeliveryOutcome::Rejected { status, .. } => {
            AckEnvelope::undelivered(format!("Test request failed with status code: {status}"))
        }
        DeliveryOutcome::Failed(reason) => {
            tracing::warn!(token = %id, %reason, "test delivery to Discord failed");
            AckEnvelope::undelivered("An error occurred whilst sending the test request")
        }
    };

    Ok(ack)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:id/event", post(receive_event))
        .route("/:id/test", post(send_test_message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embed_shape() {
        let message = test_message();
        let embed = &message["embeds"][0];
        assert_eq!(embed["title"], json!("GitLab Webhook Handler - Test Request"));
        assert_eq!(embed["color"], json!(16552998));
    }
}
