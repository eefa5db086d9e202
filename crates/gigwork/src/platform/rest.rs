use async_trait::async_trait;
use reqwest::StatusCode;

use super::{rejected, PlatformClient};
use crate::dashboard::{PlatformError, Profile, ProfileStore, UserId};

/// Profile columns plus both embedded detail relations.
pub const PROFILE_SELECT: &str = "*,manufacturer_details(*),gig_worker_details(*)";

/// Media type asking the REST gateway to return a single object and fail on any other row count.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

#[derive(Debug, Clone)]
pub struct PostgrestProfileStore {
    platform: PlatformClient,
}

impl PostgrestProfileStore {
    pub fn new(platform: PlatformClient) -> Self {
        Self { platform }
    }

    pub(crate) fn query(user_id: &UserId) -> [(&'static str, String); 2] {
        [
            ("select", PROFILE_SELECT.to_string()),
            ("user_id", format!("eq.{}", user_id.0)),
        ]
    }
}

#[async_trait]
impl ProfileStore for PostgrestProfileStore {
    async fn fetch_profile(&self, user_id: &UserId) -> Result<Profile, PlatformError> {
        let response = self
            .platform
            .http
            .get(self.platform.url("/rest/v1/profiles"))
            .query(&Self::query(user_id))
            .header("apikey", &self.platform.api_key)
            .bearer_auth(&self.platform.api_key)
            .header(reqwest::header::ACCEPT, SINGLE_OBJECT)
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_ACCEPTABLE => {
                let detail = response.text().await.unwrap_or_default();
                Err(PlatformError::Cardinality(detail))
            }
            status if status.is_success() => response
                .json::<Profile>()
                .await
                .map_err(|err| PlatformError::Decode(err.to_string())),
            _ => Err(rejected(response).await),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_expands_detail_relations_and_filters_by_user() {
        let query = PostgrestProfileStore::query(&UserId("u-42".to_string()));
        assert_eq!(
            query[0],
            (
                "select",
                "*,manufacturer_details(*),gig_worker_details(*)".to_string()
            )
        );
        assert_eq!(query[1], ("user_id", "eq.u-42".to_string()));
    }
}
