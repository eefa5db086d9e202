//! HTTP adapters for the hosted auth and data platform.

mod auth;
mod rest;

pub use auth::SupabaseAuthClient;
pub use rest::{PostgrestProfileStore, PROFILE_SELECT};

use crate::config::PlatformConfig;
use crate::dashboard::PlatformError;

/// Shared connection details for both platform services.
#[derive(Clone)]
pub struct PlatformClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PlatformClient {
    pub fn new(config: &PlatformConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(http: reqwest::Client, config: &PlatformConfig) -> Self {
        Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.service_role_key.clone(),
        }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn auth(&self) -> SupabaseAuthClient {
        SupabaseAuthClient::new(self.clone())
    }

    pub fn profiles(&self) -> PostgrestProfileStore {
        PostgrestProfileStore::new(self.clone())
    }
}

impl std::fmt::Debug for PlatformClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

pub(crate) async fn rejected(response: reqwest::Response) -> PlatformError {
    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    PlatformError::Rejected { status, message }
}
