//! Infrastructure Adapters
//!
//! Implementations of domain ports for external systems.

pub mod discord;
pub mod postgres;

// Re-exports
pub use discord::DiscordWebhookClient;
pub use postgres::PgHandlerRepository;
