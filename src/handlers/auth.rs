use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::AppError,
    middleware::auth::{create_jwt, decode_jwt},
    models::{ApiResponse, ErrorResponse, LoginRequest, NewUser, SignupRequest, DEFAULT_ROLE},
    state::AppState,
};

use super::JsonBody;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VerifyQuery {
    /// Token issued at signup.
    pub token: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created; `data` holds an unverified token"),
        (status = 400, description = "Invalid payload", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    ),
    tag = "auth"
)]
#[tracing::instrument(skip_all)]
pub async fn signup(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<SignupRequest>,
) -> Result<(StatusCode, Json<ApiResponse<String>>), AppError> {
    let valid = req.into_valid()?;
    let password_hash = hash_password(valid.password, state.config.bcrypt_cost).await?;

    let user = state
        .users
        .create(NewUser {
            first_name: valid.first_name,
            last_name: valid.last_name,
            email: valid.email,
            password_hash,
            is_verified: false,
            role: DEFAULT_ROLE.into(),
            manager_id: None,
        })
        .await?;
    tracing::info!(user_id = %user.id, "user signed up");

    let token = create_jwt(&user, &state.config)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(
            "User created successfully, please verify your account",
            token,
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/verify",
    params(VerifyQuery),
    responses(
        (status = 200, description = "Account verified; `data` holds a fresh token"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Unknown user", body = ErrorResponse)
    ),
    tag = "auth"
)]
#[tracing::instrument(skip_all)]
pub async fn verify(
    State(state): State<AppState>,
    Query(query): Query<VerifyQuery>,
) -> Result<Json<ApiResponse<String>>, AppError> {
    let token = query.token.ok_or(AppError::MissingToken)?;
    let claims = decode_jwt(&token, &state.config)?;

    let user = state
        .users
        .mark_verified(claims.sub)
        .await?
        .ok_or(AppError::UserNotFound)?;
    tracing::info!(user_id = %user.id, "user verified");

    let token = create_jwt(&user, &state.config)?;

    Ok(Json(ApiResponse::new("Account verified successfully", token)))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; `data` holds the token"),
        (status = 401, description = "Invalid email or password", body = ErrorResponse)
    ),
    tag = "auth"
)]
#[tracing::instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<ApiResponse<String>>, AppError> {
    let email = req.email.trim().to_lowercase();
    let user = state
        .users
        .find_by_email(&email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !verify_password(req.password, user.password_hash.clone()).await? {
        return Err(AppError::InvalidCredentials);
    }
    tracing::info!(user_id = %user.id, "user logged in");

    let token = create_jwt(&user, &state.config)?;

    Ok(Json(ApiResponse::new("User logged in successfully", token)))
}

async fn hash_password(password: String, cost: u32) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .map_err(|e| AppError::Internal(e.to_string()))
}

async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .map_err(|e| AppError::Internal(e.to_string()))
}
