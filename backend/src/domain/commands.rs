//! Domain-level command and query types.
//!
//! These are the inputs services accept. The REST layer maps the public DTOs
//! of the `shared` crate onto them. Required fields stay optional here so that
//! services can name the one that is missing, and timestamps stay raw text so
//! that services parse them only after the target entity is known to exist.

use chrono::NaiveDateTime;

use crate::domain::errors::{DomainError, DomainResult};

/// Parse a required timestamp field in the API format
pub fn parse_timestamp_field(field: &str, value: Option<&str>) -> DomainResult<NaiveDateTime> {
    let value = value.ok_or_else(|| DomainError::missing(field))?;
    shared::parse_timestamp(value)
        .map_err(|e| DomainError::Validation(format!("Invalid {}: {}", field, e)))
}

pub mod baths {
    use chrono::NaiveDateTime;

    use crate::domain::models::Bath;

    /// Input for creating or fully replacing a bath.
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct BathCommand {
        pub name: Option<String>,
        pub location: Option<String>,
        pub bath_type: Option<String>,
        pub maintenance_done: Option<bool>,
        pub min_temperature: Option<f64>,
        pub max_temperature: Option<f64>,
        pub is_active: Option<bool>,
    }

    /// Input for recording a temperature reading.
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct RecordMeasurementCommand {
        pub temperature: Option<f64>,
        pub measured_at: Option<String>,
    }

    /// A value together with the timestamp to send as Last-Modified.
    #[derive(Debug, Clone, PartialEq)]
    pub struct Versioned<T> {
        pub value: T,
        pub last_modified: NaiveDateTime,
    }

    pub type VersionedBath = Versioned<Bath>;
}

pub mod clients {
    /// Input for creating or fully replacing a client.
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct ClientCommand {
        pub first_name: Option<String>,
        pub last_name: Option<String>,
        pub email: Option<String>,
        pub phone: Option<String>,
    }

    /// Optional name filters for listing clients.
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct ClientListQuery {
        pub first_name: Option<String>,
        pub last_name: Option<String>,
    }

    /// Input for recording a visit.
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct RecordVisitCommand {
        pub bath_id: Option<u64>,
        pub visited_at: Option<String>,
    }
}
