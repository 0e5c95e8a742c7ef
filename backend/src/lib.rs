//! # Thermal Baths Backend
//!
//! In-memory REST backend for a network of thermal bath facilities: baths and
//! their temperature measurements, clients and the visits they make.
//!
//! ## Architecture
//!
//! - **io**: axum handlers, DTO mapping, conditional header handling
//! - **domain**: services holding every business rule
//! - **storage**: concurrent in-memory stores behind repository traits
//! - **config**: environment driven runtime settings
//!
//! Everything lives in process memory and is lost on restart.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::AppConfig;
use crate::domain::{BathService, ClientService, ModificationCache};
use crate::storage::{BathStorage, ClientStorage, MemoryConnection};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub bath_service: BathService,
    pub client_service: ClientService,
}

/// Wire the services on top of the given stores
pub fn initialize_backend(connection: MemoryConnection) -> AppState {
    info!("Setting up stores");
    let baths: Arc<dyn BathStorage> = Arc::new(connection.create_bath_repository());
    let clients: Arc<dyn ClientStorage> = Arc::new(connection.create_client_repository());

    info!("Setting up domain model");
    let bath_service = BathService::new(baths.clone(), ModificationCache::new());
    let client_service = ClientService::new(clients, baths);

    AppState {
        bath_service,
        client_service,
    }
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &AppConfig) -> Router {
    let allow_origin = match &config.cors_origin {
        Some(origin) => AllowOrigin::exact(origin.clone()),
        None => AllowOrigin::from(Any),
    };

    // Browsers only hand Last-Modified to scripts when it is exposed
    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
        .expose_headers([header::LAST_MODIFIED]);

    Router::new()
        .route("/baths", get(io::bath_apis::list_baths).post(io::bath_apis::create_bath))
        .route(
            "/baths/:id",
            get(io::bath_apis::get_bath)
                .put(io::bath_apis::update_bath)
                .delete(io::bath_apis::delete_bath),
        )
        .route(
            "/baths/:id/measurements",
            get(io::bath_apis::list_measurements).post(io::bath_apis::record_measurement),
        )
        .route("/clients", get(io::client_apis::list_clients).post(io::client_apis::create_client))
        .route(
            "/clients/:id",
            get(io::client_apis::get_client)
                .put(io::client_apis::update_client)
                .delete(io::client_apis::delete_client),
        )
        .route(
            "/clients/:id/visits",
            get(io::client_apis::visit_history).post(io::client_apis::record_visit),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}
