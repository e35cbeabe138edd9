//! HTTP client for the events service
//!
//! Attaches the stored bearer token to every request. A 401 from any
//! endpoint clears the stored credentials and sends the user to the login
//! route before the error reaches the caller.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error, warn};
use url::Url;

use crate::{
    config::ApiConfig,
    error::{AppError, AppResult},
    models::schema::{decode, Schema},
    navigation::{Navigator, Route},
    session::CredentialStore,
};

/// A response with a success status
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Decode the body against its schema
    pub fn decode<T>(&self) -> AppResult<T>
    where
        T: Schema + DeserializeOwned,
    {
        decode(&self.body)
    }
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Arc<dyn CredentialStore>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    pub fn new(
        config: &ApiConfig,
        credentials: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
    ) -> AppResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| AppError::Internal(format!("invalid base URL {}: {}", config.base_url, e)))?;

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            http: builder.build()?,
            base_url,
            credentials,
            navigator,
        })
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    pub async fn get(&self, path: &str) -> AppResult<ApiResponse> {
        let request = self.request(Method::GET, path)?;
        self.execute(request).await
    }

    pub async fn post<B>(&self, path: &str, query: &[(&str, String)], body: &B) -> AppResult<ApiResponse>
    where
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::POST, path)?.query(query).json(body);
        self.execute(request).await
    }

    /// POST without a body (check-in)
    pub async fn post_empty(&self, path: &str) -> AppResult<ApiResponse> {
        let request = self.request(Method::POST, path)?;
        self.execute(request).await
    }

    pub async fn put<B>(&self, path: &str, body: &B) -> AppResult<ApiResponse>
    where
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::PUT, path)?.json(body);
        self.execute(request).await
    }

    pub async fn delete(&self, path: &str) -> AppResult<ApiResponse> {
        let request = self.request(Method::DELETE, path)?;
        self.execute(request).await
    }

    fn request(&self, method: Method, path: &str) -> AppResult<RequestBuilder> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| AppError::Internal(format!("invalid request path {}: {}", path, e)))?;

        debug!(%method, %url, "Sending request");

        let mut request = self
            .http
            .request(method, url)
            .header("Accept", "application/json");
        if let Some(token) = self.credentials.token() {
            request = request.bearer_auth(token);
        }
        Ok(request)
    }

    async fn execute(&self, request: RequestBuilder) -> AppResult<ApiResponse> {
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            error!("Authentication failed, logging out");
            self.logout();
            return Err(AppError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Request failed");
            return Err(AppError::Status { status, body });
        }

        let body = response.bytes().await?.to_vec();
        Ok(ApiResponse { status, body })
    }

    fn logout(&self) {
        if let Err(e) = self.credentials.clear() {
            error!(error = %e, "Failed to clear stored credentials");
        }
        self.navigator.navigate(Route::Login);
    }
}
