use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{config::Config, error::AppError, models::User, state::AppState};

/// Header carrying the session token.
pub const TOKEN_HEADER: &str = "token";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    /// Whether the identity completed signup.
    pub is_verified: bool,
    pub exp: i64,
}

pub fn create_jwt(user: &User, config: &Config) -> Result<String, AppError> {
    let exp = (Utc::now() + Duration::hours(config.jwt_expiry_hours)).timestamp();
    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        is_verified: user.is_verified,
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(e.to_string()))
}

pub fn decode_jwt(token: &str, config: &Config) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!(error = %e, "rejected token");
        AppError::Unauthorized
    })
}

fn token_from_parts(parts: &Parts) -> Option<&str> {
    if let Some(token) = parts.headers.get(TOKEN_HEADER) {
        return token.to_str().ok();
    }

    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

/// A signed-up user resolved from the request token.
pub struct AuthUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = token_from_parts(parts).ok_or(AppError::MissingToken)?;
        let claims = decode_jwt(token, &state.config)?;

        if !claims.is_verified {
            return Err(AppError::Unauthorized);
        }

        let user = state
            .users
            .find_by_id(claims.sub)
            .await?
            .filter(|user| user.is_verified)
            .ok_or(AppError::Unauthorized)?;

        Ok(AuthUser(user))
    }
}

/// A signed-up user who has a manager assigned, as required for
/// submitting trip requests.
pub struct Requester {
    pub user: User,
    pub manager_id: Uuid,
}

#[async_trait]
impl FromRequestParts<AppState> for Requester {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;
        let manager_id = user.manager_id.ok_or(AppError::ManagerRequired)?;

        Ok(Requester { user, manager_id })
    }
}
