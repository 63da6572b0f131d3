use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{TripRepository, UserRepository};
use crate::{
    error::AppError,
    models::{NewTrip, NewUser, TripRequest, TripStatus, User},
};

#[derive(Default)]
pub struct InMemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    trips: RwLock<Vec<TripRequest>>,
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(AppError::UserExists);
        }

        let stored = User {
            id: Uuid::new_v4(),
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            password_hash: user.password_hash,
            is_verified: user.is_verified,
            role: user.role,
            manager_id: user.manager_id,
            created_at: Utc::now(),
        };
        users.insert(stored.id, stored.clone());

        Ok(stored)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn mark_verified(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let mut users = self.users.write().await;
        Ok(users.get_mut(&id).map(|user| {
            user.is_verified = true;
            user.clone()
        }))
    }
}

#[async_trait]
impl TripRepository for InMemoryStore {
    async fn insert(&self, trip: NewTrip) -> Result<TripRequest, AppError> {
        let mut trips = self.trips.write().await;
        if trips
            .iter()
            .any(|t| t.requester_id == trip.requester_id && t.departure_date == trip.departure_date)
        {
            return Err(AppError::DuplicateDepartureDate);
        }

        let stored = TripRequest {
            id: Uuid::new_v4(),
            destination: trip.destination,
            location: trip.location,
            departure_date: trip.departure_date,
            return_date: trip.return_date,
            reason: trip.reason,
            gender: trip.gender,
            passport_name: trip.passport_name,
            role: trip.role,
            requester_id: trip.requester_id,
            manager_id: trip.manager_id,
            status: TripStatus::Pending,
            created_at: Utc::now(),
        };
        trips.push(stored.clone());

        Ok(stored)
    }

    async fn find_by_departure(
        &self,
        requester_id: Uuid,
        departure_date: NaiveDate,
    ) -> Result<Option<TripRequest>, AppError> {
        Ok(self
            .trips
            .read()
            .await
            .iter()
            .find(|t| t.requester_id == requester_id && t.departure_date == departure_date)
            .cloned())
    }

    async fn list_by_requester(&self, requester_id: Uuid) -> Result<Vec<TripRequest>, AppError> {
        let mut trips: Vec<_> = self
            .trips
            .read()
            .await
            .iter()
            .filter(|t| t.requester_id == requester_id)
            .cloned()
            .collect();
        trips.sort_by_key(|t| t.departure_date);

        Ok(trips)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            first_name: "Jeannette".into(),
            last_name: "Uwase".into(),
            email: email.into(),
            password_hash: "hash".into(),
            is_verified: false,
            role: "requester".into(),
            manager_id: None,
        }
    }

    fn new_trip(requester_id: Uuid, departure: NaiveDate) -> NewTrip {
        NewTrip {
            requester_id,
            manager_id: Uuid::new_v4(),
            destination: "nairobi".into(),
            location: "kigali".into(),
            departure_date: departure,
            return_date: departure + chrono::Days::new(10),
            reason: "vacation".into(),
            gender: "Male".into(),
            passport_name: "Jimmy Ntare".into(),
            role: "requester".into(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = InMemoryStore::default();
        store.create(new_user("a@andela.com")).await.unwrap();

        let err = store.create(new_user("a@andela.com")).await.unwrap_err();
        assert!(matches!(err, AppError::UserExists));
    }

    #[tokio::test]
    async fn mark_verified_updates_the_user() {
        let store = InMemoryStore::default();
        let user = store.create(new_user("a@andela.com")).await.unwrap();

        let verified = store.mark_verified(user.id).await.unwrap().unwrap();
        assert!(verified.is_verified);
        assert!(store.mark_verified(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn same_departure_for_same_requester_is_rejected() {
        let store = InMemoryStore::default();
        let requester = Uuid::new_v4();
        store.insert(new_trip(requester, date(2020, 3, 15))).await.unwrap();

        let err = store
            .insert(new_trip(requester, date(2020, 3, 15)))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateDepartureDate));

        // Another requester may leave on the same day.
        store
            .insert(new_trip(Uuid::new_v4(), date(2020, 3, 15)))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn listing_is_scoped_and_ordered() {
        let store = InMemoryStore::default();
        let requester = Uuid::new_v4();
        store.insert(new_trip(requester, date(2020, 6, 1))).await.unwrap();
        store.insert(new_trip(requester, date(2020, 3, 15))).await.unwrap();
        store.insert(new_trip(Uuid::new_v4(), date(2020, 4, 1))).await.unwrap();

        let trips = store.list_by_requester(requester).await.unwrap();
        let departures: Vec<_> = trips.iter().map(|t| t.departure_date).collect();
        assert_eq!(departures, [date(2020, 3, 15), date(2020, 6, 1)]);
    }
}
