//! Offcanvas filter editor

use crate::{
    error::AppResult,
    models::{
        schema::{today, validate_request},
        Category, FilterRequest,
    },
    services::{load_categories, CategoriesApi},
};

/// Draft filter being edited in the slide-in panel.
///
/// Opening seeds the draft from the list's current filter; closing throws
/// the draft away without touching the applied filter.
#[derive(Debug, Default)]
pub struct FilterPanel {
    open: bool,
    draft: FilterRequest,
    categories: Vec<Category>,
    error: Option<&'static str>,
}

impl FilterPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn draft(&self) -> &FilterRequest {
        &self.draft
    }

    /// Categories offered for selection
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Message from the last failed category load
    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    pub async fn open(&mut self, current: &FilterRequest, categories: &dyn CategoriesApi) {
        self.open = true;
        self.draft = FilterRequest {
            name: current.name.clone(),
            date: current.date.clone(),
            category_name: Some(current.category_name.clone().unwrap_or_default()),
        };

        let mut loaded = None;
        self.error = load_categories(categories, |c| loaded = Some(c)).await.err();
        if let Some(loaded) = loaded {
            self.categories = loaded;
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = Some(name.into());
    }

    pub fn set_date(&mut self, date: impl Into<String>) {
        self.draft.date = Some(date.into());
    }

    /// Select or deselect a category by name
    pub fn toggle_category(&mut self, name: &str) {
        let selected = self.draft.category_name.get_or_insert_with(Vec::new);
        if let Some(pos) = selected.iter().position(|n| n == name) {
            selected.remove(pos);
        } else {
            selected.push(name.to_string());
        }
    }

    /// Validate the draft and close. The caller hands the result to the list.
    /// An invalid draft keeps the panel open.
    pub fn apply(&mut self) -> AppResult<FilterRequest> {
        validate_request(&self.draft, today())?;
        self.open = false;
        Ok(std::mem::take(&mut self.draft))
    }

    pub fn close(&mut self) {
        self.open = false;
        self.draft = FilterRequest::default();
    }
}
