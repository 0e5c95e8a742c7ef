use chrono::NaiveDateTime;

use super::bath::BathId;

pub type ClientId = u64;
pub type VisitId = u64;

/// Validated client attributes, everything except the identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

impl ClientFields {
    /// Key used for case-insensitive email uniqueness
    pub fn normalized_email(&self) -> String {
        normalize_email(&self.email)
    }
}

pub fn normalize_email(email: &str) -> String {
    email.to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub id: ClientId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

impl Client {
    pub fn from_fields(id: ClientId, fields: ClientFields) -> Self {
        Self {
            id,
            first_name: fields.first_name,
            last_name: fields.last_name,
            email: fields.email,
            phone: fields.phone,
        }
    }

    /// Case-insensitive exact match on the optional name filters (AND semantics)
    pub fn matches_names(&self, first_name: Option<&str>, last_name: Option<&str>) -> bool {
        let eq = |a: &str, b: &str| a.to_lowercase() == b.to_lowercase();
        first_name.map_or(true, |f| eq(&self.first_name, f))
            && last_name.map_or(true, |l| eq(&self.last_name, l))
    }
}

/// A recorded stay of a client at a bath
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    pub id: VisitId,
    pub client_id: ClientId,
    pub bath_id: BathId,
    pub visited_at: NaiveDateTime,
}
