//! The user's own agenda

use std::sync::Arc;

use tracing::error;

use crate::{error::AppError, models::EventSummary, services::EventsApi};

pub const AGENDA_INVALID: &str = "An error occurred while processing the event data.";
pub const AGENDA_FAILED: &str = "An error occurred while fetching events. Check your connection.";

#[derive(Debug, Clone, PartialEq)]
pub enum AgendaState {
    Idle,
    Loading,
    Loaded(Vec<EventSummary>),
    Error(String),
}

pub struct MyEventsView {
    api: Arc<dyn EventsApi>,
    state: AgendaState,
}

impl MyEventsView {
    pub fn new(api: Arc<dyn EventsApi>) -> Self {
        Self {
            api,
            state: AgendaState::Idle,
        }
    }

    pub fn state(&self) -> &AgendaState {
        &self.state
    }

    pub async fn load(&mut self) {
        self.state = AgendaState::Loading;
        let api = Arc::clone(&self.api);
        self.state = match api.my_events().await {
            Ok(events) => AgendaState::Loaded(events),
            Err(AppError::Decode(e)) => {
                error!(error = %e, "Agenda failed schema validation");
                AgendaState::Error(AGENDA_INVALID.to_string())
            }
            Err(e) => {
                error!(error = %e, "Failed to load agenda");
                AgendaState::Error(AGENDA_FAILED.to_string())
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::events::MockEventsApi;

    #[tokio::test]
    async fn test_empty_agenda_loads() {
        let mut api = MockEventsApi::new();
        api.expect_my_events().returning(|| Ok(Vec::new()));
        let mut view = MyEventsView::new(Arc::new(api));

        view.load().await;
        assert_eq!(view.state(), &AgendaState::Loaded(Vec::new()));
    }

    #[tokio::test]
    async fn test_decode_failure_message() {
        let mut api = MockEventsApi::new();
        api.expect_my_events()
            .returning(|| Err(AppError::Decode("bad".into())));
        let mut view = MyEventsView::new(Arc::new(api));

        view.load().await;
        assert_eq!(view.state(), &AgendaState::Error(AGENDA_INVALID.to_string()));
    }

    #[tokio::test]
    async fn test_transport_failure_message() {
        let mut api = MockEventsApi::new();
        api.expect_my_events()
            .returning(|| Err(AppError::Internal("offline".into())));
        let mut view = MyEventsView::new(Arc::new(api));

        view.load().await;
        assert_eq!(view.state(), &AgendaState::Error(AGENDA_FAILED.to_string()));
    }
}
