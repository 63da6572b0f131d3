use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::{blank_as_none, ordered_messages};
use crate::error::AppError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Payload fields in the order their errors are reported.
const PAYLOAD_FIELDS: [&str; 8] = [
    "destination",
    "location",
    "departure_date",
    "return_date",
    "reason",
    "gender",
    "passport_name",
    "role",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    Pending,
    Approved,
    Rejected,
}

impl TripStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TripStatus::Pending => "pending",
            TripStatus::Approved => "approved",
            TripStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TripStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TripStatus::Pending),
            "approved" => Ok(TripStatus::Approved),
            "rejected" => Ok(TripStatus::Rejected),
            other => Err(format!("unknown trip status `{other}`")),
        }
    }
}

/// A stored return-trip request.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    pub id: Uuid,
    pub destination: String,
    pub location: String,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
    pub reason: String,
    pub gender: String,
    pub passport_name: String,
    pub role: String,
    pub requester_id: Uuid,
    pub manager_id: Uuid,
    pub status: TripStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// A validated, normalized trip request ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTrip {
    pub requester_id: Uuid,
    pub manager_id: Uuid,
    pub destination: String,
    pub location: String,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
    pub reason: String,
    pub gender: String,
    pub passport_name: String,
    pub role: String,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTripPayload {
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(required(message = "destination is required"))]
    pub destination: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(required(message = "location is required"))]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(required(message = "departureDate is required"))]
    #[schema(example = "2020-03-15")]
    pub departure_date: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(required(message = "returnDate is required"))]
    #[schema(example = "2020-05-01")]
    pub return_date: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(required(message = "reason is required"))]
    pub reason: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(required(message = "gender is required"))]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(required(message = "passportName is required"))]
    pub passport_name: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(required(message = "role is required"))]
    pub role: Option<String>,
}

impl CreateTripPayload {
    /// Checks required fields, date formats and date ordering, then builds
    /// the normalized trip for `requester_id`.
    ///
    /// The duplicate departure rule needs the store and is applied by the
    /// repository.
    pub fn into_new_trip(self, requester_id: Uuid, manager_id: Uuid) -> Result<NewTrip, AppError> {
        let mut messages = match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => ordered_messages(&errors, &PAYLOAD_FIELDS),
        };

        let departure_date = parse_date("departureDate", self.departure_date.as_deref(), &mut messages);
        let return_date = parse_date("returnDate", self.return_date.as_deref(), &mut messages);

        let (
            Some(destination),
            Some(location),
            Some(departure_date),
            Some(return_date),
            Some(reason),
            Some(gender),
            Some(passport_name),
            Some(role),
        ) = (
            self.destination,
            self.location,
            departure_date,
            return_date,
            self.reason,
            self.gender,
            self.passport_name,
            self.role,
        )
        else {
            return Err(AppError::Validation(messages));
        };

        if !messages.is_empty() {
            return Err(AppError::Validation(messages));
        }

        if return_date <= departure_date {
            return Err(AppError::InvalidDateRange);
        }

        Ok(NewTrip {
            requester_id,
            manager_id,
            destination: destination.to_lowercase(),
            location: location.to_lowercase(),
            departure_date,
            return_date,
            reason,
            gender,
            passport_name,
            role,
        })
    }
}

fn parse_date(field: &str, value: Option<&str>, messages: &mut Vec<String>) -> Option<NaiveDate> {
    let value = value?;
    match NaiveDate::parse_from_str(value, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            messages.push(format!("{field} must be a valid date in YYYY-MM-DD format"));
            None
        }
    }
}
