//! # Vehicle Reservation Service
//!
//! Tracks vehicle reservations made by clients and exposes them over a
//! JSON/HTTP API. State lives in process memory only.
//!
//! ## Architecture
//!
//! - **domain**: Reservation entity, repository trait and the inbound
//!   `ReservationService` port
//! - **application**: `ReservationManager`, the service implementation
//! - **infrastructure**: the in-memory store
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: process bootstrap and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use application::ReservationManager;
pub use domain::{
    DomainError, DomainResult, Reservation, ReservationRepository, ReservationService,
    ReservationStatus,
};
pub use infrastructure::InMemoryReservationStore;

// Re-export API router
pub use interfaces::http::create_api_router;
