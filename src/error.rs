use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::models::ErrorResponse;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("please provide a token")]
    MissingToken,

    #[error("you are not authorised for this operation")]
    Unauthorized,

    #[error("user should have manager before performing this operation")]
    ManagerRequired,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("user with this email already exists")]
    UserExists,

    #[error("user not found")]
    UserNotFound,

    #[error("{}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("the return date must be greater than departure date")]
    InvalidDateRange,

    #[error("request with the same departure date exist")]
    DuplicateDepartureDate,

    #[error("{0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingToken
            | AppError::Unauthorized
            | AppError::ManagerRequired
            | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::UserExists => StatusCode::CONFLICT,
            AppError::UserNotFound => StatusCode::NOT_FOUND,
            AppError::Validation(_)
            | AppError::InvalidDateRange
            | AppError::DuplicateDepartureDate
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let error = match &self {
            AppError::Validation(messages) => json!(messages),
            AppError::Database(e) => {
                tracing::error!(error = %e, "database failure");
                Value::from("Database error")
            }
            AppError::Internal(e) => {
                tracing::error!(error = %e, "internal failure");
                Value::from("Internal server error")
            }
            other => Value::from(other.to_string()),
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}
