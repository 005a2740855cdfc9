pub mod inbound;

pub use inbound::{ReservationService, SharedReservationService};
