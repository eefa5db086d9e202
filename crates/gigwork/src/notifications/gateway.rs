use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::config::WhatsAppConfig;

/// Text message in the provider's send-message shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundMessage {
    pub messaging_product: &'static str,
    pub to: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: TextBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextBody {
    pub body: String,
}

impl OutboundMessage {
    pub fn text(to: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            messaging_product: "whatsapp",
            to: to.into(),
            kind: "text",
            text: TextBody { body: body.into() },
        }
    }
}

/// Outbound messaging channel used by the relay.
#[async_trait]
pub trait MessagingGateway: Send + Sync {
    /// Send one message and return the provider's JSON acknowledgement.
    async fn send(&self, message: &OutboundMessage) -> Result<Value, DeliveryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// The provider answered with a non-2xx status.
    #[error("messaging provider returned HTTP {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("messaging request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("messaging provider returned malformed JSON: {0}")]
    MalformedResponse(String),
}

/// WhatsApp Cloud API sender. No request timeout and no retry.
#[derive(Clone)]
pub struct WhatsAppCloudClient {
    client: reqwest::Client,
    endpoint: String,
    api_token: String,
}

impl WhatsAppCloudClient {
    pub fn new(config: &WhatsAppConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: &WhatsAppConfig) -> Self {
        Self {
            client,
            endpoint: config.messages_url(),
            api_token: config.api_token.clone(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl std::fmt::Debug for WhatsAppCloudClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhatsAppCloudClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl MessagingGateway for WhatsAppCloudClient {
    async fn send(&self, message: &OutboundMessage) -> Result<Value, DeliveryError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_token)
            .json(message)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|err| DeliveryError::MalformedResponse(err.to_string()))
    }
}
