use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const MISSING_MESSAGE_PLACEHOLDER: &str = "No additional message";

/// Payload posted after a worker applies to a manufacturer's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRequest {
    pub manufacturer_phone: String,
    pub worker_name: String,
    pub job_title: String,
    #[serde(default)]
    pub application_message: Option<String>,
}

/// Uniform response body. `success` is always true; `demo` marks a masked failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationEnvelope {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp_response: Option<Value>,
}

impl NotificationEnvelope {
    pub fn delivered(provider_response: Value) -> Self {
        Self {
            success: true,
            message: "WhatsApp notification sent successfully".to_string(),
            demo: None,
            error: None,
            whatsapp_response: Some(provider_response),
        }
    }

    pub fn queued() -> Self {
        Self {
            success: true,
            message: "Notification queued (WhatsApp service unavailable)".to_string(),
            demo: Some(true),
            error: None,
            whatsapp_response: None,
        }
    }

    pub fn processed_with_error(error: impl Into<String>) -> Self {
        Self {
            success: true,
            message: "Notification processed (demo mode)".to_string(),
            demo: Some(true),
            error: Some(error.into()),
            whatsapp_response: None,
        }
    }

    pub fn is_masked_failure(&self) -> bool {
        self.demo.unwrap_or(false)
    }
}

/// Prefix the default country code unless the number already carries one.
pub fn format_recipient(phone: &str, default_country_code: &str) -> String {
    if phone.starts_with('+') {
        phone.to_string()
    } else {
        format!("{default_country_code}{phone}")
    }
}

pub fn compose_message(request: &NotificationRequest) -> String {
    let note = request
        .application_message
        .as_deref()
        .filter(|message| !message.is_empty())
        .unwrap_or(MISSING_MESSAGE_PLACEHOLDER);

    format!(
        "🔔 New Job Application Alert!\n\n\
         👤 Worker: {}\n\
         📋 Job: {}\n\
         💬 Message: {}\n\n\
         Please check your dashboard to review this application.",
        request.worker_name, request.job_title, note
    )
}
