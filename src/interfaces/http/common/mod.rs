//! Shared HTTP building blocks

mod error;
mod extract;
mod response;

pub use error::ApiError;
pub use extract::{ApiJson, ApiPath};
pub use response::ApiResponse;
