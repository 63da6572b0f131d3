use serde::Deserialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::{blank_as_none, ordered_messages};
use crate::error::AppError;

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub is_verified: bool,
    pub role: String,
    pub manager_id: Option<Uuid>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Everything needed to store a new account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub is_verified: bool,
    pub role: String,
    pub manager_id: Option<Uuid>,
}

pub const DEFAULT_ROLE: &str = "requester";

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(required(message = "firstName is required"))]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(required(message = "lastName is required"))]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(
        required(message = "email is required"),
        email(message = "email must be a valid email")
    )]
    pub email: Option<String>,
    #[serde(default)]
    #[validate(
        required(message = "password is required"),
        length(min = 8, message = "password length must be at least 8 characters long")
    )]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

const SIGNUP_FIELDS: [&str; 4] = ["first_name", "last_name", "email", "password"];

/// Signup data that passed validation.
#[derive(Debug)]
pub struct ValidSignup {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl SignupRequest {
    pub fn into_valid(self) -> Result<ValidSignup, AppError> {
        let messages = match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => ordered_messages(&errors, &SIGNUP_FIELDS),
        };

        match (self.first_name, self.last_name, self.email, self.password) {
            (Some(first_name), Some(last_name), Some(email), Some(password)) if messages.is_empty() => {
                Ok(ValidSignup {
                    first_name,
                    last_name,
                    email: email.to_lowercase(),
                    password,
                })
            }
            _ => Err(AppError::Validation(messages)),
        }
    }
}
