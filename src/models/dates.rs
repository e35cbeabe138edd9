//! Calendar date parsing and the event date policies

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use validator::ValidationError;

/// Parse the calendar date out of `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM[:SS[.f]]`
/// or an RFC 3339 timestamp.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = value.parse::<NaiveDateTime>() {
        return Some(dt.date());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .ok()
        .map(|dt| dt.date())
}

/// Which dates an event form or event payload accepts.
///
/// Creating an event and editing/displaying one use different rules, and
/// the two are kept apart on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePolicy {
    /// Strictly after today (new events)
    AfterToday,
    /// Today or any later day (event detail and edits)
    FromToday,
}

impl DatePolicy {
    pub fn allows(self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            DatePolicy::AfterToday => date > today,
            DatePolicy::FromToday => date >= today,
        }
    }

    pub fn check(self, value: &str, today: NaiveDate) -> Result<(), ValidationError> {
        let date = parse_calendar_date(value).ok_or_else(|| {
            ValidationError::new("date_format").with_message(Cow::from("Invalid date."))
        })?;

        if self.allows(date, today) {
            return Ok(());
        }

        let message = match self {
            DatePolicy::AfterToday => "The date must be in the future.",
            DatePolicy::FromToday => "The date must be today or in the future.",
        };
        Err(ValidationError::new("date_policy").with_message(Cow::from(message)))
    }
}
