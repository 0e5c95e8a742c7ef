use chrono::NaiveDateTime;
use dashmap::mapref::entry::Entry;
use std::sync::PoisonError;
use tracing::debug;

use crate::domain::models::client::normalize_email;
use crate::domain::models::{BathId, Client, ClientFields, ClientId, Visit};
use crate::storage::connection::MemoryConnection;
use crate::storage::traits::{ClientStorage, StorageError};

/// In-memory client repository.
///
/// Email uniqueness is kept through the `client_ids_by_email` index: claiming
/// an address happens on the index entry itself, so two concurrent writers
/// can never both own the same (lowercased) email. Replaces are serialized on
/// `email_changes` and release the address their write displaced.
#[derive(Clone)]
pub struct ClientRepository {
    connection: MemoryConnection,
}

impl ClientRepository {
    pub fn new(connection: MemoryConnection) -> Self {
        Self { connection }
    }

    /// Claim `email` for `client_id`; succeeds if it is free or already ours
    fn claim_email(&self, email: &str, client_id: ClientId) -> Result<(), StorageError> {
        match self.connection.stores().client_ids_by_email.entry(normalize_email(email)) {
            Entry::Occupied(owner) if *owner.get() != client_id => {
                Err(StorageError::DuplicateEmail(email.to_string()))
            }
            Entry::Occupied(_) => Ok(()),
            Entry::Vacant(slot) => {
                slot.insert(client_id);
                Ok(())
            }
        }
    }

    fn release_email(&self, email: &str, client_id: ClientId) {
        self.connection
            .stores()
            .client_ids_by_email
            .remove_if(&normalize_email(email), |_, owner| *owner == client_id);
    }

    /// Store `client` in place of the current record and hand back the one it
    /// displaced. The map guard is dropped before returning.
    fn swap_client(&self, client: Client) -> Option<Client> {
        let mut entry = self.connection.stores().clients.get_mut(&client.id)?;
        Some(std::mem::replace(&mut *entry, client))
    }
}

impl ClientStorage for ClientRepository {
    fn create_client(&self, fields: ClientFields) -> Result<Client, StorageError> {
        let stores = self.connection.stores();
        let client = match stores.client_ids_by_email.entry(fields.normalized_email()) {
            Entry::Occupied(_) => return Err(StorageError::DuplicateEmail(fields.email)),
            Entry::Vacant(slot) => {
                let id = stores.client_ids.next_id();
                let client = Client::from_fields(id, fields);
                stores.clients.insert(id, client.clone());
                slot.insert(id);
                client
            }
        };
        debug!("Stored client {}", client.id);
        Ok(client)
    }

    fn get_client(&self, client_id: ClientId) -> Option<Client> {
        self.connection
            .stores()
            .clients
            .get(&client_id)
            .map(|entry| entry.value().clone())
    }

    fn list_clients(&self) -> Vec<Client> {
        let mut clients: Vec<Client> = self
            .connection
            .stores()
            .clients
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        clients.sort_by_key(|c| c.id);
        clients
    }

    fn replace_client(
        &self,
        client_id: ClientId,
        fields: ClientFields,
    ) -> Result<Option<Client>, StorageError> {
        let stores = self.connection.stores();
        let _serial = stores
            .email_changes
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if !stores.clients.contains_key(&client_id) {
            return Ok(None);
        }
        self.claim_email(&fields.email, client_id)?;

        let replacement = Client::from_fields(client_id, fields);
        let Some(displaced) = self.swap_client(replacement.clone()) else {
            // Deleted between the lookup and the write
            self.release_email(&replacement.email, client_id);
            return Ok(None);
        };

        if normalize_email(&displaced.email) != normalize_email(&replacement.email) {
            self.release_email(&displaced.email, client_id);
        }
        Ok(Some(replacement))
    }

    fn delete_client(&self, client_id: ClientId) -> Option<Client> {
        let stores = self.connection.stores();
        let (_, removed) = stores.clients.remove(&client_id)?;
        let dropped = stores
            .visits_by_client
            .remove(&client_id)
            .map_or(0, |(_, visits)| visits.len());
        self.release_email(&removed.email, client_id);
        debug!("Deleted client {} and {} visits", client_id, dropped);
        Some(removed)
    }

    fn append_visit(
        &self,
        client_id: ClientId,
        bath_id: BathId,
        visited_at: NaiveDateTime,
    ) -> Option<Visit> {
        let stores = self.connection.stores();
        let _client = stores.clients.get(&client_id)?;
        let visit = Visit {
            id: stores.visit_ids.next_id(),
            client_id,
            bath_id,
            visited_at,
        };
        stores
            .visits_by_client
            .entry(client_id)
            .or_default()
            .push(visit.clone());
        Some(visit)
    }

    fn list_visits(&self, client_id: ClientId) -> Option<Vec<Visit>> {
        let stores = self.connection.stores();
        let _client = stores.clients.get(&client_id)?;
        Some(
            stores
                .visits_by_client
                .get(&client_id)
                .map(|visits| visits.value().clone())
                .unwrap_or_default(),
        )
    }
}
