//! Schema checks applied to outgoing requests and incoming payloads

use std::borrow::Cow;

use chrono::{Local, NaiveDate};
use serde::de::DeserializeOwned;
use url::Url;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::{AppError, AppResult};

/// A type with a structural contract: serde shape plus derived `validator`
/// rules, and optionally field rules that depend on the current day or on
/// the shape of nullable strings.
pub trait Schema: Validate {
    fn check_fields(&self, _today: NaiveDate) -> Result<(), ValidationErrors> {
        Ok(())
    }

    fn check(&self, today: NaiveDate) -> Result<(), ValidationErrors> {
        self.validate()?;
        self.check_fields(today)
    }
}

/// Current local calendar day
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Decode a response body and run its schema; any mismatch is a decode error.
pub fn decode<T>(bytes: &[u8]) -> AppResult<T>
where
    T: Schema + DeserializeOwned,
{
    decode_at(bytes, today())
}

pub fn decode_at<T>(bytes: &[u8], today: NaiveDate) -> AppResult<T>
where
    T: Schema + DeserializeOwned,
{
    let value: T = serde_json::from_slice(bytes)?;
    value
        .check(today)
        .map_err(|e| AppError::Decode(e.to_string()))?;
    Ok(value)
}

/// Check an outgoing request; failures never reach the network.
pub fn validate_request<T: Schema>(value: &T, today: NaiveDate) -> AppResult<()> {
    value.check(today).map_err(AppError::from)
}

/// Collects per-field failures from hand-written rules.
#[derive(Default)]
pub(crate) struct FieldChecks {
    errors: ValidationErrors,
}

impl FieldChecks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&mut self, name: &'static str, result: Result<(), ValidationError>) -> &mut Self {
        if let Err(error) = result {
            self.errors.add(name, error);
        }
        self
    }

    /// Run `rule` on the value when present
    pub fn optional(
        &mut self,
        name: &'static str,
        value: Option<&str>,
        rule: fn(&str) -> Result<(), ValidationError>,
    ) -> &mut Self {
        match value {
            Some(v) => self.field(name, rule(v)),
            None => self,
        }
    }

    pub fn finish(&mut self) -> Result<(), ValidationErrors> {
        let errors = std::mem::take(&mut self.errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

pub(crate) fn url_or_empty(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || Url::parse(value).is_ok() {
        Ok(())
    } else {
        Err(ValidationError::new("url").with_message(Cow::from("Invalid URL.")))
    }
}

pub(crate) fn uuid_or_empty(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || Uuid::parse_str(value).is_ok() {
        Ok(())
    } else {
        Err(ValidationError::new("uuid").with_message(Cow::from("Invalid category ID.")))
    }
}
