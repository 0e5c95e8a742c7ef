//! # Storage Module
//!
//! Holds all application state. There is no persistence layer: every entity
//! lives in a concurrent in-memory map for the lifetime of the process.
//!
//! ## Layout
//!
//! - **connection**: `MemoryConnection`, the single owner of every map and ID
//!   sequence. Cheap to clone; each `MemoryConnection::new()` is an isolated
//!   set of stores, which is what tests rely on.
//! - **repositories**: `BathRepository` and `ClientRepository`, implementing the
//!   storage traits on top of the connection.
//! - **traits**: `BathStorage` / `ClientStorage`, the only view the domain
//!   layer has of storage.
//!
//! ## Concurrency
//!
//! Maps are `dashmap::DashMap`s and ID sequences are atomics, so handlers can
//! call into storage from any number of tasks without extra locking. Child
//! collections (measurements, visits) are appended under their map entry lock
//! while the parent entry is held, which keeps cascade deletes exact.

pub mod connection;
pub mod repositories;
pub mod traits;

pub use connection::{IdSequence, MemoryConnection};
pub use repositories::{BathRepository, ClientRepository};
pub use traits::{BathStorage, ClientStorage, StorageError};
