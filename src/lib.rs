//! EventSync client
//!
//! Client-side core of the EventSync events platform: typed models with
//! schema validation, an authenticated HTTP client for the events service
//! and the view state machines (filtered list, detail, forms, agenda)
//! driven by the `eventsync` command line.

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod models;
pub mod navigation;
pub mod services;
pub mod session;
pub mod views;

#[cfg(test)]
mod test_support;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use navigation::Navigator;
use session::CredentialStore;

/// Application state shared by every view
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        credentials: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
    ) -> AppResult<Self> {
        let services = services::Services::new(&config.api, credentials, navigator)?;
        Ok(Self {
            config: Arc::new(config),
            services: Arc::new(services),
        })
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        self.services.api.credentials()
    }

    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        self.services.api.navigator()
    }
}
