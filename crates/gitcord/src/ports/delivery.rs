//! Message Delivery Port
//!
//! Abstract interface for posting a rendered message to a Discord webhook
//! URL. The outcome distinguishes the failure modes the API reports
//! differently; none of them are transport errors from the caller's point
//! of view.

use async_trait::async_trait;
use serde_json::Value;

/// Result of one delivery attempt. Delivery is single-shot: no retries,
/// no queueing.
#[derive(Debug, Clone)]
pub enum DeliveryOutcome {
    /// Discord accepted the message.
    Delivered,
    /// The webhook host could not be resolved.
    UnresolvedHost,
    /// Discord answered with a non-success status.
    Rejected { status: u16, body: String },
    /// The request failed before a response arrived.
    Failed(String),
}

/// Outbound webhook delivery interface
#[async_trait]
pub trait MessageDelivery: Send + Sync {
    /// POST `message` as JSON to `url`.
    async fn deliver(&self, url: &str, message: &Value) -> DeliveryOutcome;
}
