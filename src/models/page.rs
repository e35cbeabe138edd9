//! Paginated and collection payloads

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::event::{EventSummary, Links};
use super::schema::Schema;

/// Page of events as returned by `POST /api/events/filter`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedEvents {
    pub content: Vec<EventSummary>,
    /// Zero-based page index
    pub number: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    pub number_of_elements: u32,
}

impl Schema for PaginatedEvents {}

/// What a filtered query hands back to the list view
#[derive(Debug, Clone, PartialEq)]
pub struct EventPage {
    pub events: Vec<EventSummary>,
    pub total_pages: u32,
}

impl From<PaginatedEvents> for EventPage {
    fn from(page: PaginatedEvents) -> Self {
        Self {
            events: page.content,
            total_pages: page.total_pages,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedEvents {
    #[serde(rename = "eventSummaryResponseDTOList", default)]
    pub events: Vec<EventSummary>,
}

/// Collection model returned by `GET /api/me/events`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct EventCollection {
    #[serde(rename = "_embedded", default)]
    pub embedded: Option<EmbeddedEvents>,
    #[serde(rename = "_links", default)]
    pub links: Option<Links>,
}

impl Schema for EventCollection {}

impl EventCollection {
    /// Events in the collection; a missing `_embedded` means none
    pub fn into_events(self) -> Vec<EventSummary> {
        self.embedded.map(|e| e.events).unwrap_or_default()
    }
}
