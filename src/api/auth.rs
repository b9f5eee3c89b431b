use async_trait::async_trait;

use super::ApiClient;
use crate::common::ApiError;
use crate::types::{LoginRequest, LoginResponse, RegisterRequest};

#[async_trait(?Send)]
pub trait AuthService {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError>;

    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError>;
}

pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait(?Send)]
impl AuthService for AuthApi {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.client.post_json("/auth/login", request).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        // The body echoes the created user; nothing in it is needed.
        let _: serde_json::Value = self.client.post_json("/auth/register", request).await?;
        Ok(())
    }
}
