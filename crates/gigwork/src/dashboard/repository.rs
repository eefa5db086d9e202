use async_trait::async_trait;

use super::domain::{Profile, SessionUser, UserId};

/// Read access to the profile table and its joined detail collections.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch exactly one profile for the user. Zero or several matching rows is an error.
    async fn fetch_profile(&self, user_id: &UserId) -> Result<Profile, PlatformError>;
}

/// Identity operations owned by the hosted auth service.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Resolve the user behind an access token. `Ok(None)` means the token carries no session.
    async fn current_user(&self, access_token: &str) -> Result<Option<SessionUser>, PlatformError>;
    async fn sign_out(&self, access_token: &str) -> Result<(), PlatformError>;
}

/// Failures surfaced by the hosted platform adapters.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("expected exactly one row, found {0}")]
    Cardinality(String),
    #[error("platform rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("platform unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected platform payload: {0}")]
    Decode(String),
    #[error("no active session")]
    MissingSession,
}
