//! # IO Module
//!
//! Adapter layer between HTTP clients and the domain services. Handlers are
//! plain async functions receiving the shared [`crate::AppState`] through
//! axum's `State` extractor.
//!
//! ## Endpoints
//!
//! - **/baths**: `GET`, `POST`
//! - **/baths/{id}**: `GET`, `PUT`, `DELETE`
//! - **/baths/{id}/measurements**: `GET`, `POST`
//! - **/clients**: `GET` (optional `firstName`/`lastName` filters), `POST`
//! - **/clients/{id}**: `GET`, `PUT`, `DELETE`
//! - **/clients/{id}/visits**: `GET`, `POST`

pub mod rest;

pub use rest::*;
