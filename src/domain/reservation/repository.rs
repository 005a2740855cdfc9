//! Reservation repository interface

use async_trait::async_trait;

use super::model::{NewReservation, Reservation};
use crate::domain::DomainResult;

/// Holds every reservation for the lifetime of the process.
///
/// Implementations must make each method atomic with respect to the
/// others: `create` allocates the id and appends in one step, and `cancel`
/// finds and mutates in one step.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Assign the next id, append the reservation as `ACTIVE`, return it
    async fn create(&self, new: NewReservation) -> DomainResult<Reservation>;

    /// Find reservation by ID
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>>;

    /// All reservations (any status) in creation order
    async fn find_all(&self) -> DomainResult<Vec<Reservation>>;

    /// Reservations made by a client, in creation order
    async fn find_by_client(&self, client_id: i32) -> DomainResult<Vec<Reservation>>;

    /// Reservations made for a vehicle, in creation order
    async fn find_by_vehicle(&self, vehicle_id: i32) -> DomainResult<Vec<Reservation>>;

    /// Set status = Cancelled on the first reservation with this id.
    /// Returns `false` when no reservation matches.
    async fn cancel(&self, id: i32) -> DomainResult<bool>;

    /// Number of stored reservations
    async fn count(&self) -> DomainResult<usize>;
}
