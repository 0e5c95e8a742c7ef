// Repository modules
pub mod bath_repository;
pub mod client_repository;

// Re-export repository types
pub use bath_repository::BathRepository;
pub use client_repository::ClientRepository;
