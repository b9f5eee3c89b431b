use async_trait::async_trait;

use super::ApiClient;
use crate::common::ApiError;
use crate::models::User;
use crate::types::UserEnvelope;

/// Account listing used by the administration screens.
#[async_trait(?Send)]
pub trait UserService {
    async fn list(&self) -> Result<Vec<User>, ApiError>;

    async fn details(&self, user_id: &str) -> Result<User, ApiError>;
}

pub struct UsersApi {
    client: ApiClient,
}

impl UsersApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait(?Send)]
impl UserService for UsersApi {
    async fn list(&self) -> Result<Vec<User>, ApiError> {
        self.client.get_json("/users", &[]).await
    }

    async fn details(&self, user_id: &str) -> Result<User, ApiError> {
        let envelope: UserEnvelope = self
            .client
            .get_json(&format!("/users/{}/details", user_id), &[])
            .await?;
        Ok(envelope.user)
    }
}
