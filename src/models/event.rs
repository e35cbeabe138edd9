//! Event models (filters, summaries, details and event forms)

use std::borrow::Cow;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use super::category::Category;
use super::dates::{parse_calendar_date, DatePolicy};
use super::schema::{url_or_empty, uuid_or_empty, FieldChecks, Schema};

fn blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

fn no_categories(value: &Option<Vec<String>>) -> bool {
    value.as_ref().map_or(true, Vec::is_empty)
}

/// Event search filter.
///
/// Every field is an independent, optional constraint. When serialized as
/// a request body, missing, null and empty fields are left out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FilterRequest {
    #[serde(default, skip_serializing_if = "blank")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "blank")]
    pub date: Option<String>,
    /// Category names; how several names combine is up to the events service
    #[serde(default, skip_serializing_if = "no_categories")]
    pub category_name: Option<Vec<String>>,
}

impl Default for FilterRequest {
    /// The cleared filter: `{name: "", date: "", categoryName: null}`
    fn default() -> Self {
        Self {
            name: Some(String::new()),
            date: Some(String::new()),
            category_name: None,
        }
    }
}

impl Schema for FilterRequest {
    fn check_fields(&self, _today: NaiveDate) -> Result<(), ValidationErrors> {
        let mut checks = FieldChecks::new();
        if let Some(date) = self.date.as_deref().filter(|d| !d.is_empty()) {
            let parsed = parse_calendar_date(date).map(|_| ()).ok_or_else(|| {
                ValidationError::new("date_format").with_message(Cow::from("Invalid date."))
            });
            checks.field("date", parsed);
        }
        if let Some(names) = &self.category_name {
            if names.iter().any(|n| n.trim().is_empty()) {
                checks.field(
                    "categoryName",
                    Err(ValidationError::new("blank_category")
                        .with_message(Cow::from("Category names cannot be blank."))),
                );
            }
        }
        checks.finish()
    }
}

/// Event kind as named by the events service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventType {
    Online,
    Presencial,
    Hibrido,
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            EventType::Online => "ONLINE",
            EventType::Presencial => "PRESENCIAL",
            EventType::Hibrido => "HIBRIDO",
        };
        write!(f, "{}", label)
    }
}

impl std::str::FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ONLINE" => Ok(EventType::Online),
            "PRESENCIAL" => Ok(EventType::Presencial),
            "HIBRIDO" => Ok(EventType::Hibrido),
            other => Err(format!("unknown event type: {}", other)),
        }
    }
}

/// Row returned by list and filter queries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    pub id: Uuid,
    pub name: String,
    pub date: String,
    pub start_time: String,
    pub location: Option<String>,
    pub category_name: Option<String>,
}

impl Schema for EventSummary {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organizer {
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
}

/// Named navigation links (`self`, `all-events`, `update`, `check-in`,
/// `uncheck-in`, `delete`), kept in server order.
pub type Links = IndexMap<String, Link>;

/// Full event as returned by `GET /api/events/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EventDetail {
    pub id: Uuid,
    #[validate(length(min = 1, message = "The name cannot be blank."))]
    pub name: String,
    #[validate(length(min = 1, message = "The description cannot be blank."))]
    pub description: String,
    pub location: Option<String>,
    /// Today or later
    pub date: String,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    pub event_type: EventType,
    pub ticket_url: Option<String>,
    pub official_site_url: Option<String>,
    pub online_url: Option<String>,
    pub category: Option<Category>,
    pub organizer: Organizer,
    #[serde(default)]
    pub user_is_checked_in: Option<bool>,
    #[serde(rename = "_links")]
    pub links: Links,
}

impl Schema for EventDetail {
    fn check_fields(&self, today: NaiveDate) -> Result<(), ValidationErrors> {
        FieldChecks::new()
            .field("date", DatePolicy::FromToday.check(&self.date, today))
            .optional("ticketUrl", self.ticket_url.as_deref(), url_or_empty)
            .optional("officialSiteUrl", self.official_site_url.as_deref(), url_or_empty)
            .optional("onlineUrl", self.online_url.as_deref(), url_or_empty)
            .finish()
    }
}

/// Create event request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEvent {
    #[validate(length(min = 1, message = "The name cannot be blank."))]
    pub name: String,
    #[validate(length(min = 1, message = "The description cannot be blank."))]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Strictly after today
    pub date: String,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    pub event_type: EventType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub official_site_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub online_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
}

impl Schema for CreateEvent {
    fn check_fields(&self, today: NaiveDate) -> Result<(), ValidationErrors> {
        FieldChecks::new()
            .field("date", DatePolicy::AfterToday.check(&self.date, today))
            .optional("ticketUrl", self.ticket_url.as_deref(), url_or_empty)
            .optional("officialSiteUrl", self.official_site_url.as_deref(), url_or_empty)
            .optional("onlineUrl", self.online_url.as_deref(), url_or_empty)
            .optional("categoryId", self.category_id.as_deref(), uuid_or_empty)
            .finish()
    }
}

/// Update event request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEvent {
    #[validate(length(min = 1, message = "The name cannot be blank."))]
    pub name: String,
    #[validate(length(min = 1, message = "The description cannot be blank."))]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Today or later
    pub date: String,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    pub event_type: EventType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub official_site_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub online_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
}

impl Schema for UpdateEvent {
    fn check_fields(&self, today: NaiveDate) -> Result<(), ValidationErrors> {
        FieldChecks::new()
            .field("date", DatePolicy::FromToday.check(&self.date, today))
            .optional("ticketUrl", self.ticket_url.as_deref(), url_or_empty)
            .optional("officialSiteUrl", self.official_site_url.as_deref(), url_or_empty)
            .optional("onlineUrl", self.online_url.as_deref(), url_or_empty)
            .optional("categoryId", self.category_id.as_deref(), uuid_or_empty)
            .finish()
    }
}

fn hours_minutes(time: &str) -> String {
    time.chars().take(5).collect()
}

impl From<&EventDetail> for UpdateEvent {
    /// Pre-populate the edit form from a loaded event
    fn from(event: &EventDetail) -> Self {
        let date = parse_calendar_date(&event.date)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| event.date.clone());

        Self {
            name: event.name.clone(),
            description: event.description.clone(),
            location: Some(event.location.clone().unwrap_or_default()),
            date,
            start_time: Some(event.start_time.as_deref().map(hours_minutes).unwrap_or_default()),
            end_time: Some(event.end_time.as_deref().map(hours_minutes).unwrap_or_default()),
            event_type: event.event_type,
            ticket_url: Some(event.ticket_url.clone().unwrap_or_default()),
            official_site_url: Some(event.official_site_url.clone().unwrap_or_default()),
            online_url: Some(event.online_url.clone().unwrap_or_default()),
            category_id: event.category.as_ref().map(|c| c.id.to_string()),
        }
    }
}
