use async_trait::async_trait;
use gigwork::dashboard::{
    AuthGateway, GigWorkerDetails, ManufacturerDetails, PlatformError, Profile, ProfileStore,
    SessionUser, UserId, UserType,
};
use gigwork::notifications::{DeliveryError, MessagingGateway, OutboundMessage};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryProfileStore {
    profiles: Arc<Mutex<HashMap<UserId, Profile>>>,
}

impl InMemoryProfileStore {
    pub(crate) fn insert(&self, profile: Profile) {
        let mut guard = self.profiles.lock().expect("profile mutex poisoned");
        guard.insert(profile.user_id.clone(), profile);
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn fetch_profile(&self, user_id: &UserId) -> Result<Profile, PlatformError> {
        let guard = self.profiles.lock().expect("profile mutex poisoned");
        guard
            .get(user_id)
            .cloned()
            .ok_or_else(|| PlatformError::Cardinality("0 rows".to_string()))
    }
}

/// Accepts any token registered through `issue`.
#[derive(Default, Clone)]
pub(crate) struct InMemoryAuth {
    sessions: Arc<Mutex<HashMap<String, SessionUser>>>,
}

impl InMemoryAuth {
    pub(crate) fn issue(&self, token: &str, user: SessionUser) {
        let mut guard = self.sessions.lock().expect("session mutex poisoned");
        guard.insert(token.to_string(), user);
    }
}

#[async_trait]
impl AuthGateway for InMemoryAuth {
    async fn current_user(&self, access_token: &str) -> Result<Option<SessionUser>, PlatformError> {
        let guard = self.sessions.lock().expect("session mutex poisoned");
        Ok(guard.get(access_token).cloned())
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), PlatformError> {
        let mut guard = self.sessions.lock().expect("session mutex poisoned");
        match guard.remove(access_token) {
            Some(_) => Ok(()),
            None => Err(PlatformError::MissingSession),
        }
    }
}

/// Messaging stand-in that records messages and can simulate a provider outage.
#[derive(Default, Clone)]
pub(crate) struct RecordingGateway {
    outbox: Arc<Mutex<Vec<OutboundMessage>>>,
    unavailable: bool,
}

impl RecordingGateway {
    pub(crate) fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub(crate) fn outbox(&self) -> Vec<OutboundMessage> {
        self.outbox.lock().expect("outbox mutex poisoned").clone()
    }
}

#[async_trait]
impl MessagingGateway for RecordingGateway {
    async fn send(&self, message: &OutboundMessage) -> Result<Value, DeliveryError> {
        self.outbox
            .lock()
            .expect("outbox mutex poisoned")
            .push(message.clone());
        if self.unavailable {
            return Err(DeliveryError::Rejected {
                status: 503,
                body: "provider unavailable".to_string(),
            });
        }
        Ok(json!({
            "messaging_product": "whatsapp",
            "contacts": [{ "input": message.to, "wa_id": message.to.trim_start_matches('+') }],
            "messages": [{ "id": "wamid.demo" }]
        }))
    }
}

fn attributes(pairs: &[(&str, &str)]) -> Map<String, Value> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), Value::String(value.to_string())))
        .collect()
}

/// Seed profile for demos. `complete` controls whether the role's detail record exists.
pub(crate) fn sample_profile(user_id: &UserId, user_type: UserType, complete: bool) -> Profile {
    let mut profile = Profile {
        id: format!("profile-{}", user_id.0),
        user_id: user_id.clone(),
        name: match user_type {
            UserType::Manufacturer => "Meera Textiles".to_string(),
            UserType::GigWorker => "Ravi Kumar".to_string(),
        },
        user_type,
        phone: Some("9876543210".to_string()),
        created_at: None,
        manufacturer_details: Vec::new(),
        gig_worker_details: Vec::new(),
    };

    if complete {
        match user_type {
            UserType::Manufacturer => profile.manufacturer_details.push(ManufacturerDetails {
                id: Some("mfg-1".to_string()),
                attributes: attributes(&[("company_name", "Meera Textiles Pvt Ltd")]),
            }),
            UserType::GigWorker => profile.gig_worker_details.push(GigWorkerDetails {
                id: Some("gw-1".to_string()),
                attributes: attributes(&[("skills", "welding, stitching")]),
            }),
        }
    }

    profile
}
