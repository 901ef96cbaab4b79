//! Discord Webhook Delivery
//!
//! Posts rendered messages to a Discord webhook URL using reqwest.
//! Delivery is single-shot; the caller decides what each outcome means
//! for its response.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use gitcord::{DeliveryOutcome, MessageDelivery};

/// HTTP implementation of MessageDelivery
pub struct DiscordWebhookClient {
    client: Client,
}

impl DiscordWebhookClient {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("Gitcord/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to build HTTP client");

        Self { client }
    }
}

impl Default for DiscordWebhookClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageDelivery for DiscordWebhookClient {
    async fn deliver(&self, url: &str, message: &Value) -> DeliveryOutcome {
        let response = match self.client.post(url).json(message).send().await {
            Ok(response) => response,
            // DNS/connect failures mean the webhook host itself is bogus.
            Err(e) if e.is_connect() => return DeliveryOutcome::UnresolvedHost,
            Err(e) => return DeliveryOutcome::Failed(e.to_string()),
        };

        let status = response.status();

        if status.is_success() {
            return DeliveryOutcome::Delivered;
        }

        // Cloudflare answers 530 when the origin hostname does not resolve.
        if status.as_u16() == 530 {
            return DeliveryOutcome::UnresolvedHost;
        }

        let body = response.text().await.unwrap_or_default();

        DeliveryOutcome::Rejected {
            status: status.as_u16(),
            body,
        }
    }
}
