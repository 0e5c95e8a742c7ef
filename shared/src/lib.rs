use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Wire format for every timestamp the API exchanges (headers and bodies).
///
/// Local date-time without an offset, e.g. `2025-03-14T09:26:53.589793`.
/// The fractional part is only printed when non-zero.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Minute-precision variant accepted on input, e.g. `2025-03-14T09:26`
const TIMESTAMP_FORMAT_MINUTES: &str = "%Y-%m-%dT%H:%M";

/// Format a local timestamp for the wire
pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a local timestamp received from a client
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT_MINUTES))
}

/// A bath facility as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bath {
    pub id: u64,
    pub name: String,
    pub location: String,
    /// One of `hot`, `cold`, `indoor`, `outdoor`
    #[serde(rename = "type")]
    pub bath_type: String,
    pub maintenance_done: bool,
    pub min_temperature: f64,
    pub max_temperature: f64,
    pub is_active: bool,
}

/// Body of `POST /baths` and `PUT /baths/{id}`.
///
/// Every field is optional on the wire so that a missing field is reported
/// by name instead of as a generic deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BathRequest {
    pub name: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub bath_type: Option<String>,
    pub maintenance_done: Option<bool>,
    pub min_temperature: Option<f64>,
    pub max_temperature: Option<f64>,
    /// Ignored on create (new baths are always active)
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    pub bath_id: u64,
    pub temperature: f64,
    pub measured_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMeasurementRequest {
    pub temperature: Option<f64>,
    pub measured_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

/// Body of `POST /clients` and `PUT /clients/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Query string of `GET /clients`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientListQuery {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    pub id: u64,
    pub client_id: u64,
    pub bath_id: u64,
    pub visited_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordVisitRequest {
    pub bath_id: Option<u64>,
    pub visited_at: Option<String>,
}

/// One entry of `GET /clients/{id}/visits`; the client ID is implied by the path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitHistoryItem {
    pub id: u64,
    pub bath_id: u64,
    pub visited_at: String,
}
