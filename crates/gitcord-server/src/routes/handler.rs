//! Handler Routes
//!
//! CRUD over handler configuration. The token doubles as the capability
//! to edit, so every route validates the token format before touching
//! the store.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, patch, post},
    Json, Router,
};

use gitcord::{Handler, HandlerRepository};

use crate::models::{
    ApiError, DiscordUrlRequest, HandlerEnvelope, MessageEnvelope, UpdateTemplateRequest,
};
use crate::AppState;

pub(crate) fn ensure_token(token: &str) -> Result<(), ApiError> {
    if Handler::is_valid_token(token) {
        Ok(())
    } else {
        Err(ApiError::invalid_token())
    }
}

/// Look up a handler by an already-validated token.
pub(crate) async fn find_handler(state: &AppState, token: &str) -> Result<Handler, ApiError> {
    state
        .handlers
        .find(token)
        .await?
        .ok_or_else(ApiError::handler_not_found)
}

fn validate_discord_url(url: Option<&str>) -> Result<&str, ApiError> {
    let url = url
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ApiError::bad_request("A Discord webhook URL must be provided"))?;

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ApiError::bad_request("Discord webhook URL was invalid"));
    }

    Ok(url)
}

/// Create a new handler
#[utoipa::path(
    post,
    path = "/create",
    request_body = DiscordUrlRequest,
    responses(
        (status = 200, description = "Handler created", body = HandlerEnvelope),
        (status = 400, description = "Missing or invalid Discord webhook URL")
    ),
    tag = "Handler"
)]
pub async fn create_handler(
    State(state): State<AppState>,
    body: Result<Json<DiscordUrlRequest>, JsonRejection>,
) -> Result<Json<HandlerEnvelope>, ApiError> {
    let Json(body) = body.map_err(|_| ApiError::malformed_body())?;
    let url = validate_discord_url(body.discord_url.as_deref())?;

    let handler = Handler::new(url);
    state.handlers.save(&handler).await?;

    tracing::info!(token = %handler.id, "handler created");

    Ok(Json(HandlerEnvelope::new(handler)))
}

/// Get a handler by token
#[utoipa::path(
    get,
    path = "/{id}",
    params(("id" = String, Path, description = "Handler token")),
    responses(
        (status = 200, description = "Handler configuration", body = HandlerEnvelope),
        (status = 400, description = "Invalid token format"),
        (status = 404, description = "Handler not found")
    ),
    tag = "Handler"
)]
pub async fn get_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<HandlerEnvelope>, ApiError> {
    ensure_token(&id)?;
    let handler = find_handler(&state, &id).await?;

    Ok(Json(HandlerEnvelope::new(handler)))
}

/// Delete a handler
#[utoipa::path(
    delete,
    path = "/{id}",
    params(("id" = String, Path, description = "Handler token")),
    responses(
        (status = 200, description = "Handler deleted", body = MessageEnvelope),
        (status = 404, description = "Handler not found")
    ),
    tag = "Handler"
)]
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageEnvelope>, ApiError> {
    ensure_token(&id)?;

    if !state.handlers.delete(&id).await? {
        return Err(ApiError::handler_not_found());
    }

    tracing::info!(token = %id, "handler deleted");

    Ok(Json(MessageEnvelope::ok("Handler deleted successfully")))
}

/// Enable a handler
#[utoipa::path(
    patch,
    path = "/{id}/enable",
    params(("id" = String, Path, description = "Handler token")),
    responses(
        (status = 200, description = "Handler enabled", body = HandlerEnvelope),
        (status = 400, description = "Handler is already enabled"),
        (status = 404, description = "Handler not found")
    ),
    tag = "Handler"
)]
pub async fn enable_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<HandlerEnvelope>, ApiError> {
    ensure_token(&id)?;
    let mut handler = find_handler(&state, &id).await?;

    if handler.enabled {
        return Err(ApiError::bad_request("Handler is already enabled"));
    }

    handler.enabled = true;
    state.handlers.save(&handler).await?;

    Ok(Json(HandlerEnvelope::new(handler)))
}

/// Disable a handler
#[utoipa::path(
    patch,
    path = "/{id}/disable",
    params(("id" = String, Path, description = "Handler token")),
    responses(
        (status = 200, description = "Handler disabled", body = HandlerEnvelope),
        (status = 400, description = "Handler is already disabled"),
        (status = 404, description = "Handler not found")
    ),
    tag = "Handler"
)]
pub async fn disable_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<HandlerEnvelope>, ApiError> {
    ensure_token(&id)?;
    let mut handler = find_handler(&state, &id).await?;

    if !handler.enabled {
        return Err(ApiError::bad_request("Handler is already disabled"));
    }

    handler.enabled = false;
    state.handlers.save(&handler).await?;

    Ok(Json(HandlerEnvelope::new(handler)))
}

/// Change a handler's Discord webhook URL
#[utoipa::path(
    patch,
    path = "/{id}/discord",
    params(("id" = String, Path, description = "Handler token")),
    request_body = DiscordUrlRequest,
    responses(
        (status = 200, description = "URL updated", body = HandlerEnvelope),
        (status = 400, description = "Missing or invalid Discord webhook URL"),
        (status = 404, description = "Handler not found")
    ),
    tag = "Handler"
)]
pub async fn update_discord_url(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<DiscordUrlRequest>, JsonRejection>,
) -> Result<Json<HandlerEnvelope>, ApiError> {
    ensure_token(&id)?;

    // The URL is validated before the handler is even looked up, so a bad
    // request never costs a store roundtrip.
    let Json(body) = body.map_err(|_| ApiError::malformed_body())?;
    let url = validate_discord_url(body.discord_url.as_deref())?;

    let mut handler = find_handler(&state, &id).await?;
    handler.discord_url = url.to_string();
    state.handlers.save(&handler).await?;

    Ok(Json(HandlerEnvelope::new(handler)))
}

/// Set or clear one template entry
#[utoipa::path(
    patch,
    path = "/{id}/templates",
    params(("id" = String, Path, description = "Handler token")),
    request_body = UpdateTemplateRequest,
    responses(
        (status = 200, description = "Templates updated", body = HandlerEnvelope),
        (status = 400, description = "Missing template type"),
        (status = 404, description = "Handler not found")
    ),
    tag = "Handler"
)]
pub async fn update_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateTemplateRequest>, JsonRejection>,
) -> Result<Json<HandlerEnvelope>, ApiError> {
    ensure_token(&id)?;
    let Json(body) = body.map_err(|_| ApiError::malformed_body())?;

    let template_type = body
        .template_type
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::bad_request("A template type must be provided"))?;

    let mut handler = find_handler(&state, &id).await?;

    // An empty or absent template clears the entry.
    match body.template {
        Some(template) if !template.is_empty() => handler.templates.set(template_type, template),
        _ => {
            handler.templates.remove(&template_type);
        }
    }

    state.handlers.save(&handler).await?;

    Ok(Json(HandlerEnvelope::new(handler)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_handler))
        .route("/:id", get(get_handler).delete(delete_handler))
        .route("/:id/enable", patch(enable_handler))
        .route("/:id/disable", patch(disable_handler))
        .route("/:id/discord", patch(update_discord_url))
        .route("/:id/templates", patch(update_template))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discord_url_must_be_present() {
        let err = validate_discord_url(None).unwrap_err();
        assert_eq!(err.message, "A Discord webhook URL must be provided");

        let err = validate_discord_url(Some("")).unwrap_err();
        assert_eq!(err.message, "A Discord webhook URL must be provided");
    }

    #[test]
    fn test_discord_url_must_be_http() {
        let err = validate_discord_url(Some("ftp://discord.com/api/webhooks/1/a")).unwrap_err();
        assert_eq!(err.message, "Discord webhook URL was invalid");

        assert!(validate_discord_url(Some("https://discord.com/api/webhooks/1/a")).is_ok());
        assert!(validate_discord_url(Some("http://discord.com/api/webhooks/1/a")).is_ok());
    }

    #[test]
    fn test_token_format_is_enforced() {
        assert!(ensure_token("0123abcd").is_ok());
        assert!(ensure_token("0123ABCD").is_err());
        assert!(ensure_token("not-a-token").is_err());
    }
}
