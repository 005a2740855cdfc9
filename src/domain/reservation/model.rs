//! Reservation domain entity

use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::shared::errors::ParseStatusError;

/// Reservation status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationStatus {
    /// Reservation is in effect
    Active,
    /// Reservation was cancelled; terminal
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl FromStr for ReservationStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(Self::Active),
            // Older clients still send the French cancellation tag.
            "CANCELLED" | "ANNULEE" => Ok(Self::Cancelled),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Caller-supplied part of a reservation. Nothing here is validated:
/// `date_end` may precede `date_start` and ids may point at nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub client_id: i32,
    pub vehicle_id: i32,
    pub date_start: DateTime<Utc>,
    pub date_end: DateTime<Utc>,
}

/// Vehicle reservation held by a client for a date range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    /// Store-assigned id, strictly increasing in creation order
    pub id: i32,
    pub client_id: i32,
    pub vehicle_id: i32,
    pub date_start: DateTime<Utc>,
    pub date_end: DateTime<Utc>,
    pub status: ReservationStatus,
}

impl Reservation {
    pub fn new(id: i32, new: NewReservation) -> Self {
        Self {
            id,
            client_id: new.client_id,
            vehicle_id: new.vehicle_id,
            date_start: new.date_start,
            date_end: new.date_end,
            status: ReservationStatus::Active,
        }
    }

    /// Cancel this reservation. Cancelling twice is a no-op.
    pub fn cancel(&mut self) {
        self.status = ReservationStatus::Cancelled;
    }
}

// ── Tests ──────────────────────────────────────────────────────
