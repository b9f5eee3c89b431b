//! Thin JSON client over the remote REST API.
//!
//! Every request carries `Authorization: Bearer <token>` when a token is
//! available, either from the injected [`SessionService`] or a fixed token.
//! Non-2xx responses become [`ApiError::Status`] with the server's `message`
//! when the body has one.

use reqwest::{multipart::Form, Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};

use crate::common::ApiError;
use crate::config::{normalize_base_url, AppConfig};
use crate::services::SessionService;
use crate::types::ErrorBody;

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Option<&'static SessionService>,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::build(base_url, None)
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        Self::build(&config.api_base_url, Some(config.request_timeout))
    }

    fn build(base_url: &str, timeout: Option<std::time::Duration>) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(base_url)
            .ok_or_else(|| ApiError::InvalidUrl(base_url.to_string()))?;

        let builder = Client::builder();
        // No client-level timeout in the browser; fetch enforces its own.
        #[cfg(not(target_arch = "wasm32"))]
        let builder = match timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        };
        #[cfg(target_arch = "wasm32")]
        let _ = timeout;

        Ok(Self {
            http: builder.build()?,
            base_url,
            session: None,
            token: None,
        })
    }

    /// Reads the bearer token from `session` on every request.
    pub fn with_session(mut self, session: &'static SessionService) -> Self {
        self.session = Some(session);
        self
    }

    /// Fixed bearer token, used when no session is attached.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn bearer_token(&self) -> Option<String> {
        self.session
            .and_then(SessionService::token)
            .or_else(|| self.token.clone())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        tracing::debug!(%method, %url, "api request");

        let request = self.http.request(method, url);
        match self.bearer_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let response = self.request(Method::GET, path).query(query).send().await?;
        Self::decode(response).await
    }

    pub async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.request(method, path).json(body).send().await?;
        Self::decode(response).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::POST, path, body).await
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, ApiError> {
        let response = self
            .request(Method::POST, path)
            .multipart(form)
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self.request(Method::DELETE, path).send().await?;
        Self::check(response).await.map(|_| ())
    }

    async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("").to_string());

        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let response = Self::check(response).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_base_url() {
        assert!(matches!(
            ApiClient::new("localhost:3000"),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn joins_paths_without_double_slashes() {
        let client = ApiClient::new("http://localhost:3000/api/").unwrap();
        assert_eq!(client.url("/pages"), "http://localhost:3000/api/pages");
        assert_eq!(client.url("pages/upload"), "http://localhost:3000/api/pages/upload");
    }

    #[test]
    fn fixed_token_is_used_without_session() {
        let client = ApiClient::new("http://localhost").unwrap().with_token("abc");
        assert_eq!(client.bearer_token().as_deref(), Some("abc"));
    }
}
