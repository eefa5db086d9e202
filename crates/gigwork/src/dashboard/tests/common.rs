use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use serde_json::{Map, Value};

use crate::dashboard::domain::{
    GigWorkerDetails, ManufacturerDetails, Profile, SessionContext, SessionUser, UserId, UserType,
};
use crate::dashboard::repository::{AuthGateway, PlatformError, ProfileStore};
use crate::dashboard::DashboardController;

pub(super) const TOKEN: &str = "access-token-1";

pub(super) fn user(id: &str) -> SessionUser {
    SessionUser {
        id: UserId(id.to_string()),
        email: Some(format!("{id}@example.com")),
    }
}

pub(super) fn session(id: &str) -> SessionContext {
    SessionContext::authenticated(user(id), TOKEN)
}

fn details_attributes(key: &str, value: &str) -> Map<String, Value> {
    let mut attributes = Map::new();
    attributes.insert(key.to_string(), Value::String(value.to_string()));
    attributes
}

pub(super) fn blank_profile(user_id: &str, user_type: UserType) -> Profile {
    Profile {
        id: format!("profile-{user_id}"),
        user_id: UserId(user_id.to_string()),
        name: "Asha Patel".to_string(),
        user_type,
        phone: Some("9876543210".to_string()),
        created_at: None,
        manufacturer_details: Vec::new(),
        gig_worker_details: Vec::new(),
    }
}

pub(super) fn manufacturer_profile(user_id: &str) -> Profile {
    let mut profile = blank_profile(user_id, UserType::Manufacturer);
    profile.manufacturer_details.push(ManufacturerDetails {
        id: Some("mfg-1".to_string()),
        attributes: details_attributes("company_name", "Patel Textiles"),
    });
    profile
}

pub(super) fn worker_profile(user_id: &str) -> Profile {
    let mut profile = blank_profile(user_id, UserType::GigWorker);
    profile.name = "Ravi Kumar".to_string();
    profile.gig_worker_details.push(GigWorkerDetails {
        id: Some("gw-1".to_string()),
        attributes: details_attributes("skills", "stitching"),
    });
    profile
}

#[derive(Default)]
pub(super) struct MemoryProfileStore {
    profiles: Mutex<HashMap<UserId, Profile>>,
    calls: AtomicUsize,
}

impl MemoryProfileStore {
    pub(super) fn with_profile(profile: Profile) -> Self {
        let store = Self::default();
        store.put(profile);
        store
    }

    pub(super) fn put(&self, profile: Profile) {
        self.profiles
            .lock()
            .expect("store mutex poisoned")
            .insert(profile.user_id.clone(), profile);
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn fetch_profile(&self, user_id: &UserId) -> Result<Profile, PlatformError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.profiles
            .lock()
            .expect("store mutex poisoned")
            .get(user_id)
            .cloned()
            .ok_or_else(|| PlatformError::Cardinality("0 rows".to_string()))
    }
}

/// Holds every fetch until the test releases a permit.
pub(super) struct GatedProfileStore {
    inner: MemoryProfileStore,
    permits: tokio::sync::Semaphore,
    entered: tokio::sync::Notify,
    requested: Mutex<Vec<UserId>>,
}

impl GatedProfileStore {
    pub(super) fn with_profiles(profiles: impl IntoIterator<Item = Profile>) -> Self {
        let store = Self {
            inner: MemoryProfileStore::default(),
            permits: tokio::sync::Semaphore::new(0),
            entered: tokio::sync::Notify::new(),
            requested: Mutex::new(Vec::new()),
        };
        for profile in profiles {
            store.inner.put(profile);
        }
        store
    }

    pub(super) fn release(&self) {
        self.permits.add_permits(1);
    }

    pub(super) async fn wait_for_fetch(&self) {
        self.entered.notified().await;
    }

    pub(super) fn requested(&self) -> Vec<UserId> {
        self.requested.lock().expect("store mutex poisoned").clone()
    }
}

#[async_trait]
impl ProfileStore for GatedProfileStore {
    async fn fetch_profile(&self, user_id: &UserId) -> Result<Profile, PlatformError> {
        self.requested
            .lock()
            .expect("store mutex poisoned")
            .push(user_id.clone());
        self.entered.notify_one();
        self.permits
            .acquire()
            .await
            .expect("semaphore open")
            .forget();
        self.inner.fetch_profile(user_id).await
    }
}

pub(super) struct UnavailableProfileStore;

#[async_trait]
impl ProfileStore for UnavailableProfileStore {
    async fn fetch_profile(&self, _user_id: &UserId) -> Result<Profile, PlatformError> {
        Err(PlatformError::Decode("database offline".to_string()))
    }
}

#[derive(Default)]
pub(super) struct StaticAuth {
    sessions: Mutex<HashMap<String, SessionUser>>,
    sign_out_error: Option<String>,
    signed_out: Mutex<Vec<String>>,
}

impl StaticAuth {
    pub(super) fn with_session(token: &str, user: SessionUser) -> Self {
        let auth = Self::default();
        auth.sessions
            .lock()
            .expect("auth mutex poisoned")
            .insert(token.to_string(), user);
        auth
    }

    pub(super) fn failing_sign_out(mut self, message: &str) -> Self {
        self.sign_out_error = Some(message.to_string());
        self
    }

    pub(super) fn signed_out(&self) -> Vec<String> {
        self.signed_out.lock().expect("auth mutex poisoned").clone()
    }
}

#[async_trait]
impl AuthGateway for StaticAuth {
    async fn current_user(&self, access_token: &str) -> Result<Option<SessionUser>, PlatformError> {
        Ok(self
            .sessions
            .lock()
            .expect("auth mutex poisoned")
            .get(access_token)
            .cloned())
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), PlatformError> {
        if let Some(message) = &self.sign_out_error {
            return Err(PlatformError::Rejected {
                status: 500,
                message: message.clone(),
            });
        }
        self.signed_out
            .lock()
            .expect("auth mutex poisoned")
            .push(access_token.to_string());
        Ok(())
    }
}

pub(super) fn controller<S>(store: Arc<S>) -> DashboardController<S, StaticAuth>
where
    S: ProfileStore + 'static,
{
    DashboardController::new(store, Arc::new(StaticAuth::default()))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
