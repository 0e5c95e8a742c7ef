use chrono::NaiveDateTime;
use std::fmt;
use std::str::FromStr;

pub type BathId = u64;

/// Kind of bath facility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BathType {
    Hot,
    Cold,
    Indoor,
    Outdoor,
}

impl BathType {
    pub const ALL: [BathType; 4] = [
        BathType::Hot,
        BathType::Cold,
        BathType::Indoor,
        BathType::Outdoor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BathType::Hot => "hot",
            BathType::Cold => "cold",
            BathType::Indoor => "indoor",
            BathType::Outdoor => "outdoor",
        }
    }
}

impl fmt::Display for BathType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("type must be one of: hot, cold, indoor, outdoor")]
pub struct BathTypeError {
    pub input: String,
}

impl FromStr for BathType {
    type Err = BathTypeError;

    /// Case-insensitive, surrounding whitespace ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        BathType::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| BathTypeError { input: s.to_string() })
    }
}

/// Validated bath attributes, everything except the identity
#[derive(Debug, Clone, PartialEq)]
pub struct BathFields {
    pub name: String,
    pub location: String,
    pub bath_type: BathType,
    pub maintenance_done: bool,
    pub min_temperature: f64,
    pub max_temperature: f64,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bath {
    pub id: BathId,
    pub name: String,
    pub location: String,
    pub bath_type: BathType,
    pub maintenance_done: bool,
    pub min_temperature: f64,
    pub max_temperature: f64,
    pub is_active: bool,
}

impl Bath {
    pub fn from_fields(id: BathId, fields: BathFields) -> Self {
        Self {
            id,
            name: fields.name,
            location: fields.location,
            bath_type: fields.bath_type,
            maintenance_done: fields.maintenance_done,
            min_temperature: fields.min_temperature,
            max_temperature: fields.max_temperature,
            is_active: fields.is_active,
        }
    }
}

/// A temperature reading taken at a bath
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub bath_id: BathId,
    pub temperature: f64,
    pub measured_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bath_type_accepts_known_values_any_case() {
        assert_eq!("hot".parse::<BathType>().unwrap(), BathType::Hot);
        assert_eq!("COLD".parse::<BathType>().unwrap(), BathType::Cold);
        assert_eq!("InDoor".parse::<BathType>().unwrap(), BathType::Indoor);
        assert_eq!("  outdoor ".parse::<BathType>().unwrap(), BathType::Outdoor);
    }

    #[test]
    fn test_bath_type_rejects_unknown_values() {
        for input in ["", "warm", "hot tub", "h0t", "sauna"] {
            let err = input.parse::<BathType>().unwrap_err();
            assert_eq!(err.input, input);
            assert_eq!(err.to_string(), "type must be one of: hot, cold, indoor, outdoor");
        }
    }

    #[test]
    fn test_bath_type_display_is_lowercase() {
        let rendered: Vec<String> = BathType::ALL.iter().map(|t| t.to_string()).collect();
        assert_eq!(rendered, vec!["hot", "cold", "indoor", "outdoor"]);
    }
}
