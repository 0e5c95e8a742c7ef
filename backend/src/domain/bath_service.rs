use chrono::NaiveDateTime;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::commands::baths::{
    BathCommand, RecordMeasurementCommand, Versioned, VersionedBath,
};
use crate::domain::commands::parse_timestamp_field;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::modification_cache::{CacheKey, ModificationCache};
use crate::domain::models::{Bath, BathFields, BathId, BathType, Measurement};
use crate::storage::BathStorage;

/// Service for managing bath facilities and their temperature readings
#[derive(Clone)]
pub struct BathService {
    storage: Arc<dyn BathStorage>,
    cache: ModificationCache,
}

impl BathService {
    pub fn new(storage: Arc<dyn BathStorage>, cache: ModificationCache) -> Self {
        Self { storage, cache }
    }

    /// Create a new bath; new baths are always active
    pub fn create_bath(&self, command: BathCommand) -> DomainResult<VersionedBath> {
        info!("Creating bath: name={:?}, type={:?}", command.name, command.bath_type);

        let fields = Self::validate(command, true)?;
        let bath = self.storage.create_bath(fields);
        let last_modified = self.cache.record_write(bath.id);

        info!("Created bath {} ({})", bath.id, bath.name);
        Ok(Versioned { value: bath, last_modified })
    }

    /// Get one bath, honouring If-Modified-Since
    pub fn get_bath(
        &self,
        bath_id: BathId,
        if_modified_since: Option<NaiveDateTime>,
    ) -> DomainResult<VersionedBath> {
        info!("Getting bath: {}", bath_id);

        self.cache.check_modified_since(CacheKey::Bath(bath_id), if_modified_since)?;

        let bath = self.storage.get_bath(bath_id).ok_or_else(|| {
            warn!("Bath not found: {}", bath_id);
            DomainError::bath_not_found(bath_id)
        })?;
        let last_modified = self.cache.stamp_if_absent(CacheKey::Bath(bath_id));

        Ok(Versioned { value: bath, last_modified })
    }

    /// List all baths, honouring If-Modified-Since against the collection stamp
    pub fn list_baths(
        &self,
        if_modified_since: Option<NaiveDateTime>,
    ) -> DomainResult<Versioned<Vec<Bath>>> {
        info!("Listing all baths");

        self.cache.check_modified_since(CacheKey::Collection, if_modified_since)?;

        let last_modified = self.cache.stamp_if_absent(CacheKey::Collection);
        let baths = self.storage.list_baths();

        info!("Found {} baths", baths.len());
        Ok(Versioned { value: baths, last_modified })
    }

    /// Fully replace an existing bath, honouring If-Unmodified-Since
    pub fn update_bath(
        &self,
        bath_id: BathId,
        if_unmodified_since: Option<NaiveDateTime>,
        command: BathCommand,
    ) -> DomainResult<VersionedBath> {
        info!("Updating bath: {}", bath_id);

        if !self.storage.bath_exists(bath_id) {
            warn!("Bath not found: {}", bath_id);
            return Err(DomainError::bath_not_found(bath_id));
        }
        self.cache.check_unmodified_since(bath_id, if_unmodified_since)?;

        let fields = Self::validate(command, false)?;
        let bath = self
            .storage
            .replace_bath(bath_id, fields)
            .ok_or_else(|| DomainError::bath_not_found(bath_id))?;
        let last_modified = self.cache.record_write(bath_id);

        info!("Updated bath {} ({})", bath.id, bath.name);
        Ok(Versioned { value: bath, last_modified })
    }

    /// Delete a bath and all of its measurements, honouring If-Unmodified-Since
    pub fn delete_bath(
        &self,
        bath_id: BathId,
        if_unmodified_since: Option<NaiveDateTime>,
    ) -> DomainResult<()> {
        info!("Deleting bath: {}", bath_id);

        if !self.storage.bath_exists(bath_id) {
            warn!("Bath not found: {}", bath_id);
            return Err(DomainError::bath_not_found(bath_id));
        }
        self.cache.check_unmodified_since(bath_id, if_unmodified_since)?;

        let bath = self
            .storage
            .delete_bath(bath_id)
            .ok_or_else(|| DomainError::bath_not_found(bath_id))?;
        self.cache.record_delete(bath_id);

        info!("Deleted bath {} ({})", bath.id, bath.name);
        Ok(())
    }

    /// Append a temperature reading to an existing bath.
    ///
    /// An unknown bath is reported before any problem with the reading.
    pub fn record_measurement(
        &self,
        bath_id: BathId,
        command: RecordMeasurementCommand,
    ) -> DomainResult<Measurement> {
        info!("Recording measurement for bath {}", bath_id);

        if !self.storage.bath_exists(bath_id) {
            warn!("Bath not found: {}", bath_id);
            return Err(DomainError::bath_not_found(bath_id));
        }

        let measurement = Measurement {
            bath_id,
            temperature: command.temperature.ok_or_else(|| DomainError::missing("temperature"))?,
            measured_at: parse_timestamp_field("measuredAt", command.measured_at.as_deref())?,
        };

        self.storage
            .append_measurement(measurement)
            .ok_or_else(|| DomainError::bath_not_found(bath_id))
    }

    /// Readings of an existing bath in the order they were recorded
    pub fn list_measurements(&self, bath_id: BathId) -> DomainResult<Vec<Measurement>> {
        info!("Listing measurements for bath {}", bath_id);

        self.storage.list_measurements(bath_id).ok_or_else(|| {
            warn!("Bath not found: {}", bath_id);
            DomainError::bath_not_found(bath_id)
        })
    }

    /// Check required fields, the type and the temperature range.
    /// `is_active` is forced to true on create and defaults to true on update.
    fn validate(command: BathCommand, creating: bool) -> DomainResult<BathFields> {
        let name = command.name.ok_or_else(|| DomainError::missing("name"))?;
        let location = command.location.ok_or_else(|| DomainError::missing("location"))?;
        let bath_type = command.bath_type.ok_or_else(|| DomainError::missing("type"))?;
        let maintenance_done = command
            .maintenance_done
            .ok_or_else(|| DomainError::missing("maintenanceDone"))?;
        let min_temperature = command
            .min_temperature
            .ok_or_else(|| DomainError::missing("minTemperature"))?;
        let max_temperature = command
            .max_temperature
            .ok_or_else(|| DomainError::missing("maxTemperature"))?;

        let bath_type = bath_type
            .parse::<BathType>()
            .map_err(|e| DomainError::Validation(e.to_string()))?;

        if min_temperature > max_temperature {
            return Err(DomainError::Validation(
                "minTemperature must be <= maxTemperature".to_string(),
            ));
        }

        let is_active = if creating { true } else { command.is_active.unwrap_or(true) };

        Ok(BathFields {
            name,
            location,
            bath_type,
            maintenance_done,
            min_temperature,
            max_temperature,
            is_active,
        })
    }
}
