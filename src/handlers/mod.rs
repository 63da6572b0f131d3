pub mod auth;
pub mod trips;

use axum::extract::FromRequest;

use crate::error::AppError;

pub use auth::{login, signup, verify};
pub use trips::{create_return_trip, list_trips};

/// `Json` extractor whose rejections render as [`AppError`] bodies.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);
