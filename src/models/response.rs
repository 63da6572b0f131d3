use serde::Serialize;
use utoipa::ToSchema;

/// Success envelope shared by every endpoint: `{ "message", "data" }`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

/// Error body, `error` is either a message or a list of messages.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(value_type = Object)]
    pub error: serde_json::Value,
}
