pub mod bath;
pub mod client;

pub use bath::{Bath, BathFields, BathId, BathType, BathTypeError, Measurement};
pub use client::{Client, ClientFields, ClientId, Visit, VisitId};
