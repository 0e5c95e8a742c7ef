//! # REST API Interface Layer
//!
//! HTTP endpoints for the bath registry. This layer only translates:
//! JSON bodies and conditional headers in, domain results and status codes
//! out. Business rules live in the domain services.
//!
//! ## Error Translation
//!
//! | Domain error         | Status |
//! |----------------------|--------|
//! | `Validation`         | 400    |
//! | `NotFound`           | 404    |
//! | `Conflict`           | 409    |
//! | `PreconditionFailed` | 412    |
//! | `NotModified`        | 304    |
//!
//! Malformed JSON, timestamps and conditional headers are validation errors.

pub mod bath_apis;
pub mod client_apis;
pub mod conditional;
pub mod error;
pub mod mappers;
