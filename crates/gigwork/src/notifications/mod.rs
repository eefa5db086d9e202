//! New-application notification relay.

pub mod domain;
pub mod gateway;
pub mod relay;
pub mod router;

pub use domain::{
    compose_message, format_recipient, NotificationEnvelope, NotificationRequest,
    MISSING_MESSAGE_PLACEHOLDER,
};
pub use gateway::{DeliveryError, MessagingGateway, OutboundMessage, TextBody, WhatsAppCloudClient};
pub use relay::{NotificationRelay, DELIVERIES_METRIC};
pub use router::{notification_router, RELAY_PATH};
