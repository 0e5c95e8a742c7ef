use tracing::debug;

use crate::domain::models::{Bath, BathFields, BathId, Measurement};
use crate::storage::connection::MemoryConnection;
use crate::storage::traits::BathStorage;

/// In-memory bath repository backed by the shared connection
#[derive(Clone)]
pub struct BathRepository {
    connection: MemoryConnection,
}

impl BathRepository {
    pub fn new(connection: MemoryConnection) -> Self {
        Self { connection }
    }
}

impl BathStorage for BathRepository {
    fn create_bath(&self, fields: BathFields) -> Bath {
        let stores = self.connection.stores();
        let id = stores.bath_ids.next_id();
        let bath = Bath::from_fields(id, fields);
        stores.baths.insert(id, bath.clone());
        debug!("Stored bath {}", id);
        bath
    }

    fn get_bath(&self, bath_id: BathId) -> Option<Bath> {
        self.connection
            .stores()
            .baths
            .get(&bath_id)
            .map(|entry| entry.value().clone())
    }

    fn bath_exists(&self, bath_id: BathId) -> bool {
        self.connection.stores().baths.contains_key(&bath_id)
    }

    fn list_baths(&self) -> Vec<Bath> {
        let mut baths: Vec<Bath> = self
            .connection
            .stores()
            .baths
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        baths.sort_by_key(|b| b.id);
        baths
    }

    fn replace_bath(&self, bath_id: BathId, fields: BathFields) -> Option<Bath> {
        let mut entry = self.connection.stores().baths.get_mut(&bath_id)?;
        *entry = Bath::from_fields(bath_id, fields);
        Some(entry.clone())
    }

    fn delete_bath(&self, bath_id: BathId) -> Option<Bath> {
        let stores = self.connection.stores();
        let (_, removed) = stores.baths.remove(&bath_id)?;
        // Appenders hold the bath entry while pushing, so once the bath is gone
        // no new reading can land in the series removed here.
        let dropped = stores
            .measurements_by_bath
            .remove(&bath_id)
            .map_or(0, |(_, series)| series.len());
        debug!("Deleted bath {} and {} measurements", bath_id, dropped);
        Some(removed)
    }

    fn append_measurement(&self, measurement: Measurement) -> Option<Measurement> {
        let stores = self.connection.stores();
        let _bath = stores.baths.get(&measurement.bath_id)?;
        stores
            .measurements_by_bath
            .entry(measurement.bath_id)
            .or_default()
            .push(measurement.clone());
        Some(measurement)
    }

    fn list_measurements(&self, bath_id: BathId) -> Option<Vec<Measurement>> {
        let stores = self.connection.stores();
        let _bath = stores.baths.get(&bath_id)?;
        Some(
            stores
                .measurements_by_bath
                .get(&bath_id)
                .map(|series| series.value().clone())
                .unwrap_or_default(),
        )
    }
}
