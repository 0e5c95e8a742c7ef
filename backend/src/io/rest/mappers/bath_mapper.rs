//! Conversions between the bath DTOs of `shared` and the domain layer.

use crate::domain::commands::baths::{BathCommand, RecordMeasurementCommand};
use crate::domain::models::{Bath as DomainBath, Measurement as DomainMeasurement};
use shared::{
    Bath as SharedBath, BathRequest, Measurement as SharedMeasurement, RecordMeasurementRequest,
};

/// Mapper to convert between shared bath DTOs and domain bath models.
pub struct BathMapper;

impl BathMapper {
    /// Converts a domain Bath to its DTO; the type is rendered lowercase.
    pub fn to_dto(domain: DomainBath) -> SharedBath {
        SharedBath {
            id: domain.id,
            name: domain.name,
            location: domain.location,
            bath_type: domain.bath_type.as_str().to_string(),
            maintenance_done: domain.maintenance_done,
            min_temperature: domain.min_temperature,
            max_temperature: domain.max_temperature,
            is_active: domain.is_active,
        }
    }

    pub fn to_dto_list(domain: Vec<DomainBath>) -> Vec<SharedBath> {
        domain.into_iter().map(Self::to_dto).collect()
    }

    pub fn to_command(request: BathRequest) -> BathCommand {
        BathCommand {
            name: request.name,
            location: request.location,
            bath_type: request.bath_type,
            maintenance_done: request.maintenance_done,
            min_temperature: request.min_temperature,
            max_temperature: request.max_temperature,
            is_active: request.is_active,
        }
    }

    pub fn to_measurement_dto(domain: DomainMeasurement) -> SharedMeasurement {
        SharedMeasurement {
            bath_id: domain.bath_id,
            temperature: domain.temperature,
            measured_at: shared::format_timestamp(&domain.measured_at),
        }
    }

    /// `measuredAt` is passed through as text; the service parses it once the
    /// bath is known to exist.
    pub fn to_measurement_command(request: RecordMeasurementRequest) -> RecordMeasurementCommand {
        RecordMeasurementCommand {
            temperature: request.temperature,
            measured_at: request.measured_at,
        }
    }
}
