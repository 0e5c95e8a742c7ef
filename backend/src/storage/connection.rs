use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::domain::models::{Bath, BathId, Client, ClientId, Measurement, Visit};

/// Monotonic ID generator. IDs start at 1 and are never handed out twice.
#[derive(Debug)]
pub struct IdSequence {
    next: AtomicU64,
}

impl IdSequence {
    pub fn new() -> Self {
        Self { next: AtomicU64::new(1) }
    }

    pub fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}

/// Every map the application keeps, owned in one place
#[derive(Default)]
pub(crate) struct Stores {
    pub(crate) baths: DashMap<BathId, Bath>,
    pub(crate) measurements_by_bath: DashMap<BathId, Vec<Measurement>>,
    pub(crate) clients: DashMap<ClientId, Client>,
    /// Lowercased email -> owning client
    pub(crate) client_ids_by_email: DashMap<String, ClientId>,
    pub(crate) visits_by_client: DashMap<ClientId, Vec<Visit>>,
    /// Held by client replaces, which may move an owner between two emails.
    /// Taken before any map guard.
    pub(crate) email_changes: Mutex<()>,
    pub(crate) bath_ids: IdSequence,
    pub(crate) client_ids: IdSequence,
    pub(crate) visit_ids: IdSequence,
}

/// Handle to the in-memory stores.
///
/// Cloning is cheap and every clone sees the same data. Each call to
/// [`MemoryConnection::new`] creates an independent, empty set of stores.
#[derive(Clone, Default)]
pub struct MemoryConnection {
    stores: Arc<Stores>,
}

impl MemoryConnection {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn stores(&self) -> &Stores {
        &self.stores
    }

    pub fn create_bath_repository(&self) -> super::BathRepository {
        super::BathRepository::new(self.clone())
    }

    pub fn create_client_repository(&self) -> super::ClientRepository {
        super::ClientRepository::new(self.clone())
    }
}
