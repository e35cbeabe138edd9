//! Clients for the events service endpoints

pub mod api_client;
pub mod auth;
pub mod categories;
pub mod events;

use std::sync::Arc;

use crate::{
    config::ApiConfig,
    error::AppResult,
    navigation::Navigator,
    session::CredentialStore,
};

pub use api_client::{ApiClient, ApiResponse};
pub use auth::AuthService;
pub use categories::{load_categories, CategoriesApi, CategoryService};
pub use events::{EventsApi, EventsService, PAGE_SIZE};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub api: ApiClient,
    pub auth: AuthService,
    pub categories: Arc<CategoryService>,
    pub events: Arc<EventsService>,
}

impl Services {
    /// Create all services sharing one HTTP client
    pub fn new(
        config: &ApiConfig,
        credentials: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
    ) -> AppResult<Self> {
        let api = ApiClient::new(config, credentials, navigator)?;
        Ok(Self {
            auth: AuthService::new(api.clone()),
            categories: Arc::new(CategoryService::new(api.clone())),
            events: Arc::new(EventsService::new(api.clone())),
            api,
        })
    }
}
