use async_trait::async_trait;
use reqwest::StatusCode;

use super::{rejected, PlatformClient};
use crate::dashboard::{AuthGateway, PlatformError, SessionUser};

/// Auth service client: token introspection and sign-out.
#[derive(Debug, Clone)]
pub struct SupabaseAuthClient {
    platform: PlatformClient,
}

impl SupabaseAuthClient {
    pub fn new(platform: PlatformClient) -> Self {
        Self { platform }
    }
}

#[async_trait]
impl AuthGateway for SupabaseAuthClient {
    async fn current_user(&self, access_token: &str) -> Result<Option<SessionUser>, PlatformError> {
        let response = self
            .platform
            .http
            .get(self.platform.url("/auth/v1/user"))
            .header("apikey", &self.platform.api_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(None),
            status if status.is_success() => {
                let user = response
                    .json::<SessionUser>()
                    .await
                    .map_err(|err| PlatformError::Decode(err.to_string()))?;
                Ok(Some(user))
            }
            _ => Err(rejected(response).await),
        }
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), PlatformError> {
        let response = self
            .platform
            .http
            .post(self.platform.url("/auth/v1/logout"))
            .header("apikey", &self.platform.api_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(rejected(response).await)
        }
    }
}
