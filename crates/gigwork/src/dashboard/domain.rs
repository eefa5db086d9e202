use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Identifier assigned to a user by the auth platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Authenticated identity as reported by the auth platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: UserId,
    #[serde(default)]
    pub email: Option<String>,
}

/// Explicit session handed to the dashboard controller instead of ambient hook state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    pub user: Option<SessionUser>,
    pub access_token: Option<String>,
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user: SessionUser, access_token: impl Into<String>) -> Self {
        Self {
            user: Some(user),
            access_token: Some(access_token.into()),
        }
    }
}

/// Marketplace role recorded on every profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Manufacturer,
    GigWorker,
}

impl UserType {
    pub fn label(&self) -> &'static str {
        match self {
            UserType::Manufacturer => "manufacturer",
            UserType::GigWorker => "gig_worker",
        }
    }
}

/// Employer-side detail record. Columns beyond `id` belong to the setup flow and are kept opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManufacturerDetails {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Worker-side detail record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GigWorkerDetails {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Profile row joined with both role-specific detail collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub user_id: UserId,
    pub name: String,
    pub user_type: UserType,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub manufacturer_details: Vec<ManufacturerDetails>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub gig_worker_details: Vec<GigWorkerDetails>,
}

impl Profile {
    pub fn is_manufacturer(&self) -> bool {
        matches!(self.user_type, UserType::Manufacturer)
    }
}

/// A profile still needs onboarding when neither detail collection has a record.
pub fn needs_profile_setup(profile: &Profile) -> bool {
    profile.manufacturer_details.is_empty() && profile.gig_worker_details.is_empty()
}

/// Embedded relations arrive as an array, a single object for one-to-one foreign keys, or null.
#[derive(Deserialize)]
#[serde(untagged)]
enum Embedded<T> {
    Many(Vec<T>),
    One(T),
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Option::<Embedded<T>>::deserialize(deserializer)? {
        Some(Embedded::Many(records)) => records,
        Some(Embedded::One(record)) => vec![record],
        None => Vec::new(),
    })
}
