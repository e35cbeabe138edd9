//! Event detail, check-in and delete

use std::sync::Arc;

use reqwest::StatusCode;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::EventDetail,
    navigation::{Navigator, Route},
    services::EventsApi,
    session::CredentialStore,
};

pub const MISSING_ID: &str = "Event ID not provided.";
pub const INVALID_ID: &str = "Invalid event ID.";
pub const INVALID_EVENT: &str = "Invalid event data.";
pub const LOAD_FAILED: &str = "Could not load the event.";
pub const LOGIN_REQUIRED: &str = "You need to be logged in to check in.";
pub const NOT_READY: &str = "The event is not loaded.";

pub const CHECK_IN_FORBIDDEN: &str = "You do not have permission to do this.";
pub const CHECK_IN_NOT_FOUND: &str = "Event not found.";
pub const ALREADY_CHECKED_IN: &str = "You are already checked in to this event.";
pub const CHECK_IN_FAILED: &str = "Could not update your check-in. Please try again.";

pub const DELETE_CONFIRMATION: &str =
    "Are you sure you want to delete this event? This action cannot be undone.";
pub const DELETE_FORBIDDEN: &str = "You do not have permission to delete this event.";
pub const DELETE_NOT_FOUND: &str = "Event not found for deletion.";
pub const DELETE_FAILED: &str = "Error deleting the event. Please try again.";

/// Blocking yes/no question put to the user
#[cfg_attr(test, mockall::automock)]
pub trait Prompter: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Error(String),
    NotFound,
    Ready { event: EventDetail, checked_in: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user answered no
    Cancelled,
    Deleted,
    Failed(String),
}

fn check_in_failure(status: Option<StatusCode>) -> &'static str {
    match status.map(|s| s.as_u16()) {
        Some(403) => CHECK_IN_FORBIDDEN,
        Some(404) => CHECK_IN_NOT_FOUND,
        Some(409) => ALREADY_CHECKED_IN,
        _ => CHECK_IN_FAILED,
    }
}

fn delete_failure(error: &AppError) -> &'static str {
    match error.status().map(|s| s.as_u16()) {
        Some(403) => DELETE_FORBIDDEN,
        Some(404) => DELETE_NOT_FOUND,
        _ => DELETE_FAILED,
    }
}

pub struct EventDetailView {
    api: Arc<dyn EventsApi>,
    credentials: Arc<dyn CredentialStore>,
    navigator: Arc<dyn Navigator>,
    state: DetailState,
}

impl EventDetailView {
    pub fn new(
        api: Arc<dyn EventsApi>,
        credentials: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            api,
            credentials,
            navigator,
            state: DetailState::Loading,
        }
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn event(&self) -> Option<&EventDetail> {
        match &self.state {
            DetailState::Ready { event, .. } => Some(event),
            _ => None,
        }
    }

    pub fn checked_in(&self) -> Option<bool> {
        match self.state {
            DetailState::Ready { checked_in, .. } => Some(checked_in),
            _ => None,
        }
    }

    /// Label of the check-in button
    pub fn check_in_label(&self) -> Option<&'static str> {
        self.checked_in().map(|checked_in| {
            if checked_in {
                "Cancel check-in"
            } else {
                "Check in"
            }
        })
    }

    /// Fetch the event named by the route parameter
    pub async fn load(&mut self, id: Option<&str>) {
        let Some(raw) = id else {
            self.state = DetailState::Error(MISSING_ID.to_string());
            return;
        };
        let Some(id) = parse_event_id(raw) else {
            warn!(event_id = raw, "Rejecting malformed event id");
            self.state = DetailState::Error(INVALID_ID.to_string());
            return;
        };

        self.state = DetailState::Loading;
        let api = Arc::clone(&self.api);
        self.state = match api.get(id).await {
            Ok(Some(event)) => DetailState::Ready {
                checked_in: event.user_is_checked_in.unwrap_or(false),
                event,
            },
            Ok(None) => DetailState::NotFound,
            Err(AppError::Decode(e)) => {
                error!(event_id = %id, error = %e, "Event failed schema validation");
                DetailState::Error(INVALID_EVENT.to_string())
            }
            Err(e) => {
                error!(event_id = %id, error = %e, "Failed to load event");
                DetailState::Error(LOAD_FAILED.to_string())
            }
        };
    }

    /// Whether the check-in control is offered
    pub fn can_check_in(&self) -> bool {
        self.credentials.is_authenticated()
    }

    /// Whether edit and delete controls are shown: the stored email matches
    /// the organizer's. Display only; the events service decides whether
    /// the edit or delete is actually allowed.
    pub fn can_manage(&self) -> bool {
        match (self.event(), self.credentials.email()) {
            (Some(event), Some(email)) => event.organizer.email == email,
            _ => false,
        }
    }

    pub fn edit_route(&self) -> Option<Route> {
        if !self.can_manage() {
            return None;
        }
        self.event().map(|e| Route::EditEvent(e.id))
    }

    /// Check in, or undo the check-in, depending on the current local state.
    /// Only a 204 changes local state. Returns the new checked-in flag.
    pub async fn toggle_check_in(&mut self) -> Result<bool, &'static str> {
        if !self.can_check_in() {
            return Err(LOGIN_REQUIRED);
        }
        let (id, currently) = match &self.state {
            DetailState::Ready { event, checked_in } => (event.id, *checked_in),
            _ => return Err(NOT_READY),
        };

        let api = Arc::clone(&self.api);
        let result = if currently {
            api.uncheck_in(id).await
        } else {
            api.check_in(id).await
        };

        match result {
            Ok(status) if status == StatusCode::NO_CONTENT => {
                if let DetailState::Ready { checked_in, .. } = &mut self.state {
                    *checked_in = !currently;
                }
                info!(event_id = %id, checked_in = !currently, "Check-in updated");
                Ok(!currently)
            }
            Ok(status) => {
                warn!(event_id = %id, status = status.as_u16(), "Unexpected check-in status");
                Err(check_in_failure(Some(status)))
            }
            Err(e) => {
                error!(event_id = %id, error = %e, "Check-in request failed");
                Err(check_in_failure(e.status()))
            }
        }
    }

    /// Ask for confirmation, delete, and go home on success
    pub async fn delete(&mut self, prompter: &dyn Prompter) -> DeleteOutcome {
        let Some(id) = self.event().map(|e| e.id) else {
            return DeleteOutcome::Failed(DELETE_FAILED.to_string());
        };
        if !prompter.confirm(DELETE_CONFIRMATION) {
            return DeleteOutcome::Cancelled;
        }

        match self.api.delete(id).await {
            Ok(status) if status == StatusCode::OK || status == StatusCode::NO_CONTENT => {
                info!(event_id = %id, "Event deleted");
                self.navigator.navigate(Route::Home);
                DeleteOutcome::Deleted
            }
            Ok(status) => DeleteOutcome::Failed(format!(
                "Error deleting the event: status {}",
                status.as_u16()
            )),
            Err(e) => {
                error!(event_id = %id, error = %e, "Failed to delete event");
                DeleteOutcome::Failed(delete_failure(&e).to_string())
            }
        }
    }
}

/// Event id from a route parameter, if it is a valid UUID
pub fn parse_event_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}
