//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use crate::models::{
    AckEnvelope, DiscordUrlRequest, HandlerEnvelope, MessageEnvelope, UpdateTemplateRequest,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Handler endpoints
        super::handler::create_handler,
        super::handler::get_handler,
        super::handler::delete_handler,
        super::handler::enable_handler,
        super::handler::disable_handler,
        super::handler::update_discord_url,
        super::handler::update_template,
        // Event endpoints
        super::event::receive_event,
        super::event::send_test_message,
    ),
    components(schemas(
        DiscordUrlRequest,
        UpdateTemplateRequest,
        HandlerEnvelope,
        MessageEnvelope,
        AckEnvelope,
    )),
    tags(
        (name = "Handler", description = "Handler configuration management"),
        (name = "Event", description = "GitLab event intake and Discord delivery")
    ),
    info(
        title = "Gitcord API",
        description = "Relay GitLab webhook events to Discord with per-event message templates"
    )
)]
pub struct ApiDoc;
