//! # Domain Module
//!
//! Business rules for the bath registry, independent of HTTP and of how the
//! stores are implemented.
//!
//! ## Module Organization
//!
//! - **bath_service**: bath CRUD, conditional reads/writes, measurements
//! - **client_service**: client CRUD, email uniqueness, visit history
//! - **modification_cache**: last-modification stamps behind Last-Modified,
//!   If-Modified-Since and If-Unmodified-Since
//! - **commands**: service inputs, mapped from the public DTOs by the REST layer
//! - **models**: entities and validated field sets
//! - **errors**: `DomainError`, the single failure type of every operation
//!
//! ## Business Rules
//!
//! - Bath type is one of hot, cold, indoor, outdoor (any case)
//! - A bath's minimum temperature never exceeds its maximum
//! - New baths are active
//! - Client emails are unique, compared case-insensitively
//! - Visits may only reference baths that exist when the visit is recorded
//! - Deleting a bath removes its measurements; deleting a client removes
//!   their visits

pub mod bath_service;
pub mod client_service;
pub mod commands;
pub mod errors;
pub mod modification_cache;
pub mod models;

pub use bath_service::BathService;
pub use client_service::ClientService;
pub use errors::{DomainError, DomainResult};
pub use modification_cache::{CacheEntry, CacheKey, ModificationCache};
