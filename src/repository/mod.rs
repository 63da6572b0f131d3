//! Storage seam for users and trip requests.
//!
//! Handlers only see the traits; [`PgUserRepository`]/[`PgTripRepository`]
//! back them with PostgreSQL and [`InMemoryStore`] keeps everything in
//! process.

mod memory;
mod postgres;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{NewTrip, NewUser, TripRequest, User},
};

pub use memory::InMemoryStore;
pub use postgres::{PgTripRepository, PgUserRepository};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with [`AppError::UserExists`] when the email is taken.
    async fn create(&self, user: NewUser) -> Result<User, AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    /// Returns the updated user, or `None` if it does not exist.
    async fn mark_verified(&self, id: Uuid) -> Result<Option<User>, AppError>;
}

#[async_trait]
pub trait TripRepository: Send + Sync {
    /// Fails with [`AppError::DuplicateDepartureDate`] when the requester
    /// already has a trip leaving on the same day.
    async fn insert(&self, trip: NewTrip) -> Result<TripRequest, AppError>;
    async fn find_by_departure(
        &self,
        requester_id: Uuid,
        departure_date: NaiveDate,
    ) -> Result<Option<TripRequest>, AppError>;
    /// Trips of `requester_id`, earliest departure first.
    async fn list_by_requester(&self, requester_id: Uuid) -> Result<Vec<TripRequest>, AppError>;
}
