use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use super::{TripRepository, UserRepository};
use crate::{
    error::AppError,
    models::{NewTrip, NewUser, TripRequest, TripStatus, User},
};

const USER_COLUMNS: &str =
    "id, first_name, last_name, email, password_hash, is_verified, role, manager_id, created_at";

const TRIP_COLUMNS: &str = "id, requester_id, manager_id, destination, location, departure_date, \
     return_date, reason, gender, passport_name, role, status, created_at";

const USERS_EMAIL_KEY: &str = "users_email_key";
const TRIPS_DEPARTURE_KEY: &str = "trip_requests_requester_departure_key";

/// Maps a unique violation on `constraint` to `conflict`.
fn map_unique_violation(e: sqlx::Error, constraint: &str, conflict: AppError) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.constraint() == Some(constraint) {
            return conflict;
        }
    }
    AppError::Database(e)
}

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (first_name, last_name, email, password_hash, is_verified, role, manager_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {USER_COLUMNS}"
        ))
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.is_verified)
        .bind(&user.role)
        .bind(user.manager_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, USERS_EMAIL_KEY, AppError::UserExists))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user =
            sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;

        Ok(user)
    }

    async fn mark_verified(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET is_verified = TRUE WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

pub struct PgTripRepository {
    pool: PgPool,
}

impl PgTripRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn trip_from_row(r: &PgRow) -> Result<TripRequest, AppError> {
    let status: String = r.try_get("status")?;

    Ok(TripRequest {
        id: r.try_get("id")?,
        destination: r.try_get("destination")?,
        location: r.try_get("location")?,
        departure_date: r.try_get("departure_date")?,
        return_date: r.try_get("return_date")?,
        reason: r.try_get("reason")?,
        gender: r.try_get("gender")?,
        passport_name: r.try_get("passport_name")?,
        role: r.try_get("role")?,
        requester_id: r.try_get("requester_id")?,
        manager_id: r.try_get("manager_id")?,
        status: status.parse::<TripStatus>().map_err(AppError::Internal)?,
        created_at: r.try_get("created_at")?,
    })
}

#[async_trait]
impl TripRepository for PgTripRepository {
    async fn insert(&self, trip: NewTrip) -> Result<TripRequest, AppError> {
        let row = sqlx::query(&format!(
            "INSERT INTO trip_requests
                (requester_id, manager_id, destination, location, departure_date, return_date,
                 reason, gender, passport_name, role, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {TRIP_COLUMNS}"
        ))
        .bind(trip.requester_id)
        .bind(trip.manager_id)
        .bind(&trip.destination)
        .bind(&trip.location)
        .bind(trip.departure_date)
        .bind(trip.return_date)
        .bind(&trip.reason)
        .bind(&trip.gender)
        .bind(&trip.passport_name)
        .bind(&trip.role)
        .bind(TripStatus::Pending.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, TRIPS_DEPARTURE_KEY, AppError::DuplicateDepartureDate))?;

        trip_from_row(&row)
    }

    async fn find_by_departure(
        &self,
        requester_id: Uuid,
        departure_date: NaiveDate,
    ) -> Result<Option<TripRequest>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {TRIP_COLUMNS} FROM trip_requests WHERE requester_id = $1 AND departure_date = $2"
        ))
        .bind(requester_id)
        .bind(departure_date)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(trip_from_row).transpose()
    }

    async fn list_by_requester(&self, requester_id: Uuid) -> Result<Vec<TripRequest>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {TRIP_COLUMNS} FROM trip_requests WHERE requester_id = $1 ORDER BY departure_date"
        ))
        .bind(requester_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(trip_from_row).collect()
    }
}
