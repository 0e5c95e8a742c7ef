pub mod bath_mapper;
pub mod client_mapper;

pub use bath_mapper::BathMapper;
pub use client_mapper::ClientMapper;
