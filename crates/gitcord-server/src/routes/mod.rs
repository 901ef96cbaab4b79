//! Gitcord API Routes
//!
//! - POST /create - create a handler
//! - GET/DELETE /:id - fetch or remove a handler
//! - PATCH /:id/enable, /:id/disable - toggle a handler
//! - PATCH /:id/discord - change the Discord webhook URL
//! - PATCH /:id/templates - set or clear one template entry
//! - POST /:id/event - receive a GitLab webhook and forward it
//! - POST /:id/test - send a test embed to the configured URL

pub mod event;
pub mod handler;
pub mod swagger;
