//! Inbound ports — the operations remote callers may invoke
//!
//! Transports (the HTTP API today) are adapters over [`ReservationService`];
//! they never touch the repository directly for mutations.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::reservation::{Reservation, ReservationStatus};
use crate::domain::DomainResult;

// ── ReservationService ─────────────────────────────────────────

/// Remote operations on vehicle reservations.
#[async_trait]
pub trait ReservationService: Send + Sync {
    /// Create an `ACTIVE` reservation. Inputs are not validated; overlapping
    /// ranges for the same vehicle are accepted.
    async fn create_reservation(
        &self,
        client_id: i32,
        vehicle_id: i32,
        date_start: DateTime<Utc>,
        date_end: DateTime<Utc>,
    ) -> DomainResult<Reservation>;

    /// Cancel by id. `Ok(false)` means no such reservation; cancelling an
    /// already-cancelled reservation returns `Ok(true)`.
    async fn cancel_reservation(&self, reservation_id: i32) -> DomainResult<bool>;

    /// Every reservation of a client, cancelled ones included, oldest first.
    async fn reservations_by_client(&self, client_id: i32) -> DomainResult<Vec<Reservation>>;

    /// Every reservation of a vehicle, cancelled ones included, oldest first.
    async fn reservations_by_vehicle(&self, vehicle_id: i32) -> DomainResult<Vec<Reservation>>;

    /// Single reservation lookup.
    async fn get_reservation(&self, reservation_id: i32) -> DomainResult<Reservation>;

    /// All reservations, oldest first, optionally only those in `status`.
    async fn list_reservations(
        &self,
        status: Option<ReservationStatus>,
    ) -> DomainResult<Vec<Reservation>>;
}

/// Shared handle used by transport adapters
pub type SharedReservationService = Arc<dyn ReservationService>;
