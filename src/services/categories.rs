//! Category lookup

use async_trait::async_trait;
use tracing::error;

use crate::{
    error::AppResult,
    models::{Category, CategoryList},
};

use super::api_client::ApiClient;

pub const LOAD_CATEGORIES_FAILED: &str = "Error loading categories. Please try again later.";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoriesApi: Send + Sync {
    async fn fetch_categories(&self) -> AppResult<Vec<Category>>;
}

#[derive(Clone)]
pub struct CategoryService {
    api: ApiClient,
}

impl CategoryService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CategoriesApi for CategoryService {
    async fn fetch_categories(&self) -> AppResult<Vec<Category>> {
        let response = self.api.get("/api/categories").await?;
        let CategoryList(categories) = response.decode()?;
        Ok(categories)
    }
}

/// Fetch categories and hand them to `set` on success. On failure the
/// setter is not called and the user-facing message is returned.
pub async fn load_categories<F>(api: &dyn CategoriesApi, set: F) -> Result<(), &'static str>
where
    F: FnOnce(Vec<Category>),
{
    match api.fetch_categories().await {
        Ok(categories) => {
            set(categories);
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Failed to load categories");
            Err(LOAD_CATEGORIES_FAILED)
        }
    }
}
