//! Reservation business logic service

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::info;

use crate::domain::{
    DomainError, DomainResult, NewReservation, Reservation, ReservationRepository,
    ReservationService, ReservationStatus,
};

/// Implements the remote reservation operations over an injected store
pub struct ReservationManager {
    repository: Arc<dyn ReservationRepository>,
}

impl ReservationManager {
    pub fn new(repository: Arc<dyn ReservationRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl ReservationService for ReservationManager {
    async fn create_reservation(
        &self,
        client_id: i32,
        vehicle_id: i32,
        date_start: DateTime<Utc>,
        date_end: DateTime<Utc>,
    ) -> DomainResult<Reservation> {
        let reservation = self
            .repository
            .create(NewReservation {
                client_id,
                vehicle_id,
                date_start,
                date_end,
            })
            .await?;

        metrics::counter!("reservations_created_total").increment(1);
        info!(
            "Reservation {} created: client {} vehicle {} ({} → {})",
            reservation.id, client_id, vehicle_id, date_start, date_end
        );

        Ok(reservation)
    }

    async fn cancel_reservation(&self, reservation_id: i32) -> DomainResult<bool> {
        let cancelled = self.repository.cancel(reservation_id).await?;

        let result = if cancelled { "found" } else { "missing" };
        metrics::counter!("reservations_cancelled_total", "result" => result).increment(1);
        if cancelled {
            info!("Reservation {} cancelled", reservation_id);
        } else {
            info!("Cancel requested for unknown reservation {}", reservation_id);
        }

        Ok(cancelled)
    }

    async fn reservations_by_client(&self, client_id: i32) -> DomainResult<Vec<Reservation>> {
        self.repository.find_by_client(client_id).await
    }

    async fn reservations_by_vehicle(&self, vehicle_id: i32) -> DomainResult<Vec<Reservation>> {
        self.repository.find_by_vehicle(vehicle_id).await
    }

    async fn get_reservation(&self, reservation_id: i32) -> DomainResult<Reservation> {
        self.repository
            .find_by_id(reservation_id)
            .await?
            .ok_or_else(|| DomainError::reservation_not_found(reservation_id))
    }

    async fn list_reservations(
        &self,
        status: Option<ReservationStatus>,
    ) -> DomainResult<Vec<Reservation>> {
        let mut reservations = self.repository.find_all().await?;
        if let Some(status) = status {
            reservations.retain(|r| r.status == status);
        }
        Ok(reservations)
    }
}
