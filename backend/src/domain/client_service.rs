use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::commands::clients::{ClientCommand, ClientListQuery, RecordVisitCommand};
use crate::domain::commands::parse_timestamp_field;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Client, ClientFields, ClientId, Visit};
use crate::storage::{BathStorage, ClientStorage};

/// Service for managing clients and their visit history
#[derive(Clone)]
pub struct ClientService {
    clients: Arc<dyn ClientStorage>,
    baths: Arc<dyn BathStorage>,
}

impl ClientService {
    pub fn new(clients: Arc<dyn ClientStorage>, baths: Arc<dyn BathStorage>) -> Self {
        Self { clients, baths }
    }

    /// Create a new client with a unique (case-insensitive) email
    pub fn create_client(&self, command: ClientCommand) -> DomainResult<Client> {
        info!("Creating client: {:?} {:?}", command.first_name, command.last_name);

        let fields = Self::validate(command)?;
        let client = self.clients.create_client(fields).map_err(|e| {
            warn!("Rejected client: {}", e);
            DomainError::from(e)
        })?;

        info!("Created client {} ({} {})", client.id, client.first_name, client.last_name);
        Ok(client)
    }

    pub fn get_client(&self, client_id: ClientId) -> DomainResult<Client> {
        info!("Getting client: {}", client_id);

        self.clients.get_client(client_id).ok_or_else(|| {
            warn!("Client not found: {}", client_id);
            DomainError::client_not_found(client_id)
        })
    }

    /// List clients, optionally filtered by first and/or last name
    pub fn list_clients(&self, query: ClientListQuery) -> Vec<Client> {
        info!("Listing clients with query: {:?}", query);

        let clients: Vec<Client> = self
            .clients
            .list_clients()
            .into_iter()
            .filter(|c| c.matches_names(query.first_name.as_deref(), query.last_name.as_deref()))
            .collect();

        info!("Found {} clients", clients.len());
        clients
    }

    /// Fully replace an existing client
    pub fn update_client(
        &self,
        client_id: ClientId,
        command: ClientCommand,
    ) -> DomainResult<Client> {
        info!("Updating client: {}", client_id);

        if self.clients.get_client(client_id).is_none() {
            warn!("Client not found: {}", client_id);
            return Err(DomainError::client_not_found(client_id));
        }

        let fields = Self::validate(command)?;
        let client = self
            .clients
            .replace_client(client_id, fields)
            .map_err(|e| {
                warn!("Rejected update of client {}: {}", client_id, e);
                DomainError::from(e)
            })?
            .ok_or_else(|| DomainError::client_not_found(client_id))?;

        info!("Updated client {}", client.id);
        Ok(client)
    }

    /// Delete a client together with their visit history
    pub fn delete_client(&self, client_id: ClientId) -> DomainResult<()> {
        info!("Deleting client: {}", client_id);

        let client = self.clients.delete_client(client_id).ok_or_else(|| {
            warn!("Client not found: {}", client_id);
            DomainError::client_not_found(client_id)
        })?;

        info!("Deleted client {} ({} {})", client.id, client.first_name, client.last_name);
        Ok(())
    }

    /// Record that a client visited a bath.
    ///
    /// The bath only has to exist now; later deleting it leaves the visit in
    /// the history.
    pub fn record_visit(
        &self,
        client_id: ClientId,
        command: RecordVisitCommand,
    ) -> DomainResult<Visit> {
        info!("Recording visit for client {}", client_id);

        if self.clients.get_client(client_id).is_none() {
            warn!("Client not found: {}", client_id);
            return Err(DomainError::client_not_found(client_id));
        }

        let bath_id = command.bath_id.ok_or_else(|| DomainError::missing("bathId"))?;
        let visited_at = parse_timestamp_field("visitedAt", command.visited_at.as_deref())?;

        if !self.baths.bath_exists(bath_id) {
            warn!("Visit for client {} references unknown bath {}", client_id, bath_id);
            return Err(DomainError::bath_not_found(bath_id));
        }

        let visit = self
            .clients
            .append_visit(client_id, bath_id, visited_at)
            .ok_or_else(|| DomainError::client_not_found(client_id))?;

        info!("Recorded visit {} (client {}, bath {})", visit.id, client_id, bath_id);
        Ok(visit)
    }

    /// Visits of an existing client in the order they were recorded
    pub fn visit_history(&self, client_id: ClientId) -> DomainResult<Vec<Visit>> {
        info!("Getting visit history for client {}", client_id);

        self.clients.list_visits(client_id).ok_or_else(|| {
            warn!("Client not found: {}", client_id);
            DomainError::client_not_found(client_id)
        })
    }

    fn validate(command: ClientCommand) -> DomainResult<ClientFields> {
        Ok(ClientFields {
            first_name: command.first_name.ok_or_else(|| DomainError::missing("firstName"))?,
            last_name: command.last_name.ok_or_else(|| DomainError::missing("lastName"))?,
            email: command.email.ok_or_else(|| DomainError::missing("email"))?,
            phone: command.phone.ok_or_else(|| DomainError::missing("phone"))?,
        })
    }
}
