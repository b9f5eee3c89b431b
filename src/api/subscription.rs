use async_trait::async_trait;
use reqwest::Method;

use super::ApiClient;
use crate::common::ApiError;
use crate::models::{SubscriptionStatus, User};
use crate::types::{PageLimit, SubscriptionStatusRequest, SubscriptionUpdateRequest, UserEnvelope};

/// Page-count quota consulted before a new page is drafted.
#[async_trait(?Send)]
pub trait QuotaService {
    async fn check_page_limit(&self, owner_id: &str) -> Result<PageLimit, ApiError>;
}

#[async_trait(?Send)]
pub trait SubscriptionService {
    /// User record with its current subscription fields.
    async fn status(&self, user_id: &str) -> Result<User, ApiError>;

    async fn update(&self, user_id: &str, status: SubscriptionStatus) -> Result<User, ApiError>;
}

pub struct SubscriptionApi {
    client: ApiClient,
}

impl SubscriptionApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait(?Send)]
impl QuotaService for SubscriptionApi {
    async fn check_page_limit(&self, owner_id: &str) -> Result<PageLimit, ApiError> {
        self.client
            .get_json("/pages/page/limit", &[("userId", owner_id)])
            .await
    }
}

#[async_trait(?Send)]
impl SubscriptionService for SubscriptionApi {
    async fn status(&self, user_id: &str) -> Result<User, ApiError> {
        let body = SubscriptionStatusRequest {
            user_id: user_id.to_string(),
        };
        let envelope: UserEnvelope = self
            .client
            .post_json("/users/subscription/status", &body)
            .await?;
        Ok(envelope.user)
    }

    async fn update(&self, user_id: &str, status: SubscriptionStatus) -> Result<User, ApiError> {
        let body = SubscriptionUpdateRequest {
            user_id: user_id.to_string(),
            subscription_status: status,
        };
        let envelope: UserEnvelope = self
            .client
            .send_json(Method::PUT, "/users/update-subscription", &body)
            .await?;
        Ok(envelope.user)
    }
}
