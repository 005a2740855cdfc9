pub mod ports;
pub mod reservation;

pub use ports::{ReservationService, SharedReservationService};
pub use reservation::{NewReservation, Reservation, ReservationRepository, ReservationStatus};

// Re-export DomainError from shared for convenience
pub use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
