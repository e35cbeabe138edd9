//! Authentication payloads and stored credentials

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::schema::Schema;

/// Login form
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format."))]
    pub email: String,
    #[validate(length(min = 8, message = "The password must be at least 8 characters."))]
    pub password: String,
}

impl Schema for LoginRequest {}

/// Registration form
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, message = "The name must be at least 2 characters."))]
    pub name: String,
    #[validate(email(message = "Invalid email format."))]
    pub email: String,
    #[validate(length(min = 8, message = "The password must be at least 8 characters."))]
    pub password: String,
}

impl Schema for RegisterRequest {}

/// Body of a successful login
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginResponse {
    #[validate(length(min = 1))]
    pub token: String,
}

impl Schema for LoginResponse {}

/// What the client persists between runs. Passwords are never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(rename = "accessToken")]
    pub access_token: String,
    pub email: String,
}
