//! Event category

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use super::schema::Schema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}

impl Schema for Category {}

/// Body of `GET /api/categories`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryList(pub Vec<Category>);

impl Validate for CategoryList {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}

impl Schema for CategoryList {}
