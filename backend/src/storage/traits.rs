//! # Storage Traits
//!
//! Storage abstraction the domain layer is written against. The in-memory
//! repositories implement them; services only ever see `Arc<dyn ...>`.

use chrono::NaiveDateTime;

use crate::domain::models::{
    Bath, BathFields, BathId, Client, ClientFields, ClientId, Measurement, Visit,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("Email already in use: {0}")]
    DuplicateEmail(String),
}

/// Bath records and their measurement series
pub trait BathStorage: Send + Sync {
    /// Store a new bath under a freshly assigned ID
    fn create_bath(&self, fields: BathFields) -> Bath;

    fn get_bath(&self, bath_id: BathId) -> Option<Bath>;

    fn bath_exists(&self, bath_id: BathId) -> bool;

    /// All baths ordered by ID
    fn list_baths(&self) -> Vec<Bath>;

    /// Replace every attribute of an existing bath.
    /// Returns `None` without storing anything when the bath does not exist.
    fn replace_bath(&self, bath_id: BathId, fields: BathFields) -> Option<Bath>;

    /// Remove a bath together with all of its measurements
    fn delete_bath(&self, bath_id: BathId) -> Option<Bath>;

    /// Append a reading to the bath's series.
    /// Returns `None` when the bath does not exist (or is being deleted).
    fn append_measurement(&self, measurement: Measurement) -> Option<Measurement>;

    /// Readings in insertion order, `None` when the bath does not exist
    fn list_measurements(&self, bath_id: BathId) -> Option<Vec<Measurement>>;
}

/// Client records, the email index and per-client visit history
pub trait ClientStorage: Send + Sync {
    /// Store a new client under a freshly assigned ID.
    /// Fails when another client already uses the email (case-insensitive).
    fn create_client(&self, fields: ClientFields) -> Result<Client, StorageError>;

    fn get_client(&self, client_id: ClientId) -> Option<Client>;

    /// All clients ordered by ID
    fn list_clients(&self) -> Vec<Client>;

    /// Replace every attribute of an existing client.
    /// `Ok(None)` when the client does not exist.
    fn replace_client(
        &self,
        client_id: ClientId,
        fields: ClientFields,
    ) -> Result<Option<Client>, StorageError>;

    /// Remove a client together with its visit history
    fn delete_client(&self, client_id: ClientId) -> Option<Client>;

    /// Assign a visit ID and append to the client's history.
    /// Returns `None` when the client does not exist (or is being deleted).
    fn append_visit(
        &self,
        client_id: ClientId,
        bath_id: BathId,
        visited_at: NaiveDateTime,
    ) -> Option<Visit>;

    /// Visits in insertion order, `None` when the client does not exist
    fn list_visits(&self, client_id: ClientId) -> Option<Vec<Visit>>;
}
