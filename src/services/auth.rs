//! Login, registration and logout

use tracing::{error, info};

use crate::{
    error::AppResult,
    models::{
        schema::{today, validate_request},
        Credentials, LoginRequest, LoginResponse, RegisterRequest,
    },
    navigation::Route,
};

use super::api_client::ApiClient;

#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Log in, store the token and email, and go to the home route
    pub async fn login(&self, request: &LoginRequest) -> AppResult<()> {
        validate_request(request, today())?;

        let response = self.api.post("/api/auth/login", &[], request).await.map_err(|e| {
            error!(error = %e, "Login failed");
            e
        })?;
        let LoginResponse { token } = response.decode()?;

        self.api.credentials().set(Credentials {
            access_token: token,
            email: request.email.clone(),
        })?;
        info!(email = %request.email, "Logged in");

        self.api.navigator().navigate(Route::Home);
        Ok(())
    }

    /// Register an account, then send the user to the login route
    pub async fn register(&self, request: &RegisterRequest) -> AppResult<()> {
        validate_request(request, today())?;
        self.api.post("/api/auth/register", &[], request).await?;
        info!(email = %request.email, "Registered");
        self.api.navigator().navigate(Route::Login);
        Ok(())
    }

    pub fn logout(&self) -> AppResult<()> {
        self.api.credentials().clear()
    }

    pub fn is_authenticated(&self) -> bool {
        self.api.credentials().is_authenticated()
    }

    pub fn email(&self) -> Option<String> {
        self.api.credentials().email()
    }
}
