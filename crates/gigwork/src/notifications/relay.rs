use std::sync::Arc;

use tracing::{error, info, warn};

use super::domain::{compose_message, format_recipient, NotificationEnvelope, NotificationRequest};
use super::gateway::{DeliveryError, MessagingGateway, OutboundMessage};

pub const DELIVERIES_METRIC: &str = "notification_relay_deliveries_total";

/// Relays new-application events to the manufacturer's phone.
///
/// Callers always receive a success envelope so the application flow is never blocked;
/// real failures are reported to operators through logs and the outcome counter.
pub struct NotificationRelay<G> {
    gateway: Arc<G>,
    default_country_code: String,
}

impl<G> NotificationRelay<G>
where
    G: MessagingGateway + 'static,
{
    pub fn new(gateway: Arc<G>, default_country_code: impl Into<String>) -> Self {
        Self {
            gateway,
            default_country_code: default_country_code.into(),
        }
    }

    pub fn outbound_message(&self, request: &NotificationRequest) -> OutboundMessage {
        let recipient = format_recipient(&request.manufacturer_phone, &self.default_country_code);
        OutboundMessage::text(recipient, compose_message(request))
    }

    pub async fn relay(&self, request: &NotificationRequest) -> NotificationEnvelope {
        info!(phone = %request.manufacturer_phone, "sending WhatsApp notification");

        let message = self.outbound_message(request);
        match self.gateway.send(&message).await {
            Ok(provider_response) => {
                info!(to = %message.to, "WhatsApp message sent");
                record_outcome("delivered");
                NotificationEnvelope::delivered(provider_response)
            }
            Err(DeliveryError::Rejected { status, body }) => {
                warn!(status, %body, "WhatsApp API rejected notification");
                record_outcome("rejected");
                NotificationEnvelope::queued()
            }
            Err(err) => {
                error!(error = %err, "WhatsApp notification failed");
                record_outcome("failed");
                NotificationEnvelope::processed_with_error(err.to_string())
            }
        }
    }

    /// Entry point for raw request bodies. Unparseable payloads are masked like any other failure.
    pub async fn relay_raw(&self, body: &[u8]) -> NotificationEnvelope {
        match serde_json::from_slice::<NotificationRequest>(body) {
            Ok(request) => self.relay(&request).await,
            Err(err) => {
                error!(error = %err, "invalid notification payload");
                record_outcome("failed");
                NotificationEnvelope::processed_with_error(err.to_string())
            }
        }
    }
}

fn record_outcome(outcome: &'static str) {
    metrics::counter!(DELIVERIES_METRIC, "outcome" => outcome).increment(1);
}
