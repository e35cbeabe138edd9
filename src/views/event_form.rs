//! Create and edit event forms

use std::sync::Arc;

use tracing::error;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{
        schema::{today, validate_request},
        CreateEvent, UpdateEvent,
    },
    navigation::{Navigator, Route},
    services::EventsApi,
};

use super::event_detail::parse_event_id;

pub const CREATE_FAILED: &str = "Error creating event.";
pub const UPDATE_FAILED: &str = "Error updating event. Please try again.";
pub const INVALID_RESPONSE: &str = "Could not validate the data returned by the server.";
pub const MISSING_EDIT_ID: &str = "Event ID not provided for editing.";
pub const INVALID_EDIT_ID: &str = "Invalid event ID.";
pub const INVALID_EDIT_EVENT: &str = "Error processing the event data.";
pub const EDIT_LOAD_FAILED: &str = "Could not load the event for editing.";

/// Submits event forms and routes to the saved event
pub struct EventForm {
    api: Arc<dyn EventsApi>,
    navigator: Arc<dyn Navigator>,
}

impl EventForm {
    pub fn new(api: Arc<dyn EventsApi>, navigator: Arc<dyn Navigator>) -> Self {
        Self { api, navigator }
    }

    /// Validate and create. On success the user lands on the new event; if
    /// the server's answer does not decode they land on the home route.
    pub async fn create(&self, form: &CreateEvent) -> Result<Uuid, String> {
        validate_request(form, today()).map_err(|e| e.to_string())?;

        match self.api.create(form).await {
            Ok(event) => {
                self.navigator.navigate(Route::ViewEvent(event.id));
                Ok(event.id)
            }
            Err(AppError::Decode(e)) => {
                error!(error = %e, "Created event failed schema validation");
                self.navigator.navigate(Route::Home);
                Err(INVALID_RESPONSE.to_string())
            }
            Err(e) => {
                error!(error = %e, "Failed to create event");
                Err(CREATE_FAILED.to_string())
            }
        }
    }

    /// Load an event and turn it into a pre-filled edit form
    pub async fn load_for_edit(&self, id: Option<&str>) -> Result<UpdateEvent, &'static str> {
        let Some(raw) = id else {
            return Err(MISSING_EDIT_ID);
        };
        let Some(id) = parse_event_id(raw) else {
            return Err(INVALID_EDIT_ID);
        };

        match self.api.get(id).await {
            Ok(Some(event)) => Ok(UpdateEvent::from(&event)),
            Ok(None) => Err(EDIT_LOAD_FAILED),
            Err(AppError::Decode(e)) => {
                error!(event_id = %id, error = %e, "Event for editing failed schema validation");
                Err(INVALID_EDIT_EVENT)
            }
            Err(e) => {
                error!(event_id = %id, error = %e, "Failed to load event for editing");
                Err(EDIT_LOAD_FAILED)
            }
        }
    }

    pub async fn update(&self, id: Uuid, form: &UpdateEvent) -> Result<Uuid, String> {
        validate_request(form, today()).map_err(|e| e.to_string())?;

        match self.api.update(id, form).await {
            Ok(event) => {
                self.navigator.navigate(Route::ViewEvent(event.id));
                Ok(event.id)
            }
            Err(AppError::Decode(e)) => {
                error!(event_id = %id, error = %e, "Updated event failed schema validation");
                self.navigator.navigate(Route::Home);
                Err(INVALID_RESPONSE.to_string())
            }
            Err(e) => {
                error!(event_id = %id, error = %e, "Failed to update event");
                Err(UPDATE_FAILED.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventDetail, EventType};
    use crate::navigation::History;
    use crate::services::events::MockEventsApi;
    use crate::test_support::{detail_json, EVENT_ID};
    use chrono::Duration;

    fn tomorrow() -> String {
        (today() + Duration::days(1)).format("%Y-%m-%d").to_string()
    }

    fn form(date: String) -> CreateEvent {
        CreateEvent {
            name: "Rust Meetup".into(),
            description: "Monthly meetup".into(),
            location: None,
            date,
            start_time: Some("19:00".into()),
            end_time: Some("21:00".into()),
            event_type: EventType::Presencial,
            ticket_url: Some(String::new()),
            official_site_url: None,
            online_url: None,
            category_id: None,
        }
    }

    fn detail() -> EventDetail {
        serde_json::from_value(detail_json(false)).unwrap()
    }

    #[tokio::test]
    async fn test_create_navigates_to_new_event() {
        let mut api = MockEventsApi::new();
        api.expect_create().times(1).returning(|_| Ok(detail()));
        let history = Arc::new(History::new());
        let view = EventForm::new(Arc::new(api), history.clone());

        let id = view.create(&form(tomorrow())).await.unwrap();

        assert_eq!(id.to_string(), EVENT_ID);
        assert_eq!(history.current(), Some(Route::ViewEvent(id)));
    }

    #[tokio::test]
    async fn test_create_today_is_rejected_locally() {
        let mut api = MockEventsApi::new();
        api.expect_create().never();
        let view = EventForm::new(Arc::new(api), Arc::new(History::new()));

        let today = today().format("%Y-%m-%d").to_string();
        assert!(view.create(&form(today)).await.is_err());
    }

    #[tokio::test]
    async fn test_undecodable_answer_goes_home() {
        let mut api = MockEventsApi::new();
        api.expect_create()
            .returning(|_| Err(AppError::Decode("missing _links".into())));
        let history = Arc::new(History::new());
        let view = EventForm::new(Arc::new(api), history.clone());

        let err = view.create(&form(tomorrow())).await.unwrap_err();
        assert_eq!(err, INVALID_RESPONSE);
        assert_eq!(history.current(), Some(Route::Home));
    }

    #[tokio::test]
    async fn test_edit_round() {
        let mut api = MockEventsApi::new();
        api.expect_get().returning(|_| Ok(Some(detail())));
        api.expect_update()
            .withf(|_, form| form.start_time.as_deref() == Some("09:00"))
            .times(1)
            .returning(|_, _| Ok(detail()));
        let history = Arc::new(History::new());
        let view = EventForm::new(Arc::new(api), history.clone());

        let mut form = view.load_for_edit(Some(EVENT_ID)).await.unwrap();
        assert_eq!(form.date, "2099-11-02");
        form.name = "RustConf 2099".into();

        let id = Uuid::parse_str(EVENT_ID).unwrap();
        view.update(id, &form).await.unwrap();
        assert_eq!(history.current(), Some(Route::ViewEvent(id)));
    }

    #[tokio::test]
    async fn test_edit_without_id() {
        let view = EventForm::new(Arc::new(MockEventsApi::new()), Arc::new(History::new()));
        assert_eq!(view.load_for_edit(None).await.unwrap_err(), MISSING_EDIT_ID);
    }

    #[tokio::test]
    async fn test_edit_with_malformed_id() {
        let mut api = MockEventsApi::new();
        api.expect_get().never();
        let view = EventForm::new(Arc::new(api), Arc::new(History::new()));
        assert_eq!(
            view.load_for_edit(Some("../categories")).await.unwrap_err(),
            INVALID_EDIT_ID
        );
    }

    #[tokio::test]
    async fn test_update_failure_message() {
        let mut api = MockEventsApi::new();
        api.expect_update().returning(|_, _| {
            Err(AppError::Status {
                status: reqwest::StatusCode::FORBIDDEN,
                body: String::new(),
            })
        });
        let history = Arc::new(History::new());
        let view = EventForm::new(Arc::new(api), history.clone());

        let form = UpdateEvent::from(&detail());
        let id = Uuid::parse_str(EVENT_ID).unwrap();
        assert_eq!(view.update(id, &form).await.unwrap_err(), UPDATE_FAILED);
        assert!(history.current().is_none());
    }
}
