use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn reservation_not_found(id: i32) -> Self {
        DomainError::NotFound {
            entity: "Reservation",
            field: "id",
            value: id.to_string(),
        }
    }
}

/// Failure to turn a wire string into a reservation status.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown reservation status: {0}")]
pub struct ParseStatusError(pub String);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_reservation() {
        let err = DomainError::reservation_not_found(42);
        assert_eq!(err.to_string(), "Not found: Reservation with id=42");
    }
}
