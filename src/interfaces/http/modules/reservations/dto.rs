//! Reservation DTOs

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::reservation::{Reservation, ReservationStatus};
use crate::interfaces::http::common::ApiError;

/// Request to create a new reservation
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReservationRequest {
    /// Client making the reservation (not checked for existence)
    pub client_id: i32,
    /// Vehicle being reserved (availability is not checked)
    pub vehicle_id: i32,
    /// Start of the reservation (RFC 3339; without an offset, or as a bare
    /// date, it is read as UTC)
    #[schema(example = "2024-01-01T00:00:00Z")]
    pub date_start: String,
    /// End of the reservation (RFC 3339); may precede `date_start`
    #[schema(example = "2024-01-05T00:00:00Z")]
    pub date_end: String,
}

impl CreateReservationRequest {
    /// Parse both dates into UTC.
    pub fn parse_dates(&self) -> Result<(DateTime<Utc>, DateTime<Utc>), ApiError> {
        Ok((
            parse_timestamp("date_start", &self.date_start)?,
            parse_timestamp("date_end", &self.date_end)?,
        ))
    }
}

/// Offset-less forms are taken as UTC; a bare date means midnight.
fn parse_timestamp(field: &str, raw: &str) -> Result<DateTime<Utc>, ApiError> {
    let rfc3339_error = match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => return Ok(dt.with_timezone(&Utc)),
        Err(e) => e,
    };

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Some(midnight) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc());
    }

    Err(ApiError::BadRequest(format!(
        "Invalid {}: {}",
        field, rfc3339_error
    )))
}

/// Filters for the reservation list
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct ReservationFilter {
    /// `ACTIVE` or `CANCELLED` (`ANNULEE` is accepted for `CANCELLED`)
    pub status: Option<String>,
}

impl ReservationFilter {
    pub fn parse_status(&self) -> Result<Option<ReservationStatus>, ApiError> {
        Ok(self
            .status
            .as_deref()
            .map(str::parse::<ReservationStatus>)
            .transpose()?)
    }
}

/// Reservation details in API responses
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReservationDto {
    pub id: i32,
    pub client_id: i32,
    pub vehicle_id: i32,
    pub date_start: String,
    pub date_end: String,
    /// `ACTIVE` or `CANCELLED`
    #[schema(example = "ACTIVE")]
    pub status: String,
}

impl From<Reservation> for ReservationDto {
    fn from(r: Reservation) -> Self {
        Self {
            id: r.id,
            client_id: r.client_id,
            vehicle_id: r.vehicle_id,
            date_start: r.date_start.to_rfc3339(),
            date_end: r.date_end.to_rfc3339(),
            status: r.status.as_str().to_string(),
        }
    }
}

/// Response from cancelling a reservation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CancelReservationResponse {
    /// `true` if a reservation with that id exists (it is now cancelled)
    pub cancelled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewReservation;
    use chrono::TimeZone;

    #[test]
    fn offsets_are_normalized_to_utc() {
        let req = CreateReservationRequest {
            client_id: 1,
            vehicle_id: 2,
            date_start: "2024-01-01T02:00:00+02:00".into(),
            date_end: "2024-01-05T00:00:00Z".into(),
        };
        let (start, end) = req.parse_dates().unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap());
    }

    #[test]
    fn offsetless_and_bare_dates_read_as_utc() {
        let req = CreateReservationRequest {
            client_id: 1,
            vehicle_id: 2,
            date_start: "2024-01-01T08:30:00.250".into(),
            date_end: "2024-01-05".into(),
        };
        let (start, end) = req.parse_dates().unwrap();
        assert_eq!(
            start,
            Utc.with_ymd_and_hms(2024, 1, 1, 8, 30, 0).unwrap()
                + chrono::Duration::milliseconds(250)
        );
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap());
    }

    #[test]
    fn bad_date_names_the_field() {
        let req = CreateReservationRequest {
            client_id: 1,
            vehicle_id: 2,
            date_start: "2024-01-01T00:00:00Z".into(),
            date_end: "next tuesday".into(),
        };
        let err = req.parse_dates().unwrap_err();
        assert!(err.to_string().starts_with("Invalid date_end"));
    }

    #[test]
    fn filter_status_accepts_legacy_tag() {
        let filter = ReservationFilter {
            status: Some("ANNULEE".into()),
        };
        assert_eq!(filter.parse_status().unwrap(), Some(ReservationStatus::Cancelled));
        assert_eq!(ReservationFilter::default().parse_status().unwrap(), None);
    }

    #[test]
    fn filter_status_rejects_unknown_values() {
        let filter = ReservationFilter {
            status: Some("EXPIRED".into()),
        };
        let err = filter.parse_status().unwrap_err();
        assert_eq!(err.to_string(), "Unknown reservation status: EXPIRED");
    }

    #[test]
    fn dto_carries_all_six_fields() {
        let mut r = Reservation::new(
            4,
            NewReservation {
                client_id: 1,
                vehicle_id: 10,
                date_start: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
                date_end: Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap(),
            },
        );
        r.cancel();

        let json = serde_json::to_value(ReservationDto::from(r)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 4,
                "client_id": 1,
                "vehicle_id": 10,
                "date_start": "2024-01-01T00:00:00+00:00",
                "date_end": "2024-01-05T00:00:00+00:00",
                "status": "CANCELLED",
            })
        );
    }
}
