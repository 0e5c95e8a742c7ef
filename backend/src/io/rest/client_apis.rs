//! # REST API for Client Management
//!
//! Endpoints for client CRUD and for the visits a client makes to baths.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::info;

use super::error::json_rejection;
use super::mappers::ClientMapper;
use crate::domain::models::ClientId;
use crate::AppState;
use shared::{ClientListQuery, ClientRequest, RecordVisitRequest};

/// Create a new client
pub async fn create_client(
    State(state): State<AppState>,
    payload: Result<Json<ClientRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return json_rejection(rejection).into_response(),
    };
    info!("POST /clients - request: {:?}", request);

    match state.client_service.create_client(ClientMapper::to_command(request)) {
        Ok(client) => (StatusCode::CREATED, Json(ClientMapper::to_dto(client))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// List clients, optionally filtered by first and/or last name (any case)
pub async fn list_clients(
    State(state): State<AppState>,
    Query(query): Query<ClientListQuery>,
) -> Response {
    info!("GET /clients - query: {:?}", query);

    let clients = state
        .client_service
        .list_clients(ClientMapper::to_list_query(query));
    (StatusCode::OK, Json(ClientMapper::to_dto_list(clients))).into_response()
}

/// Get a client by ID
pub async fn get_client(
    State(state): State<AppState>,
    Path(client_id): Path<ClientId>,
) -> Response {
    info!("GET /clients/{}", client_id);

    match state.client_service.get_client(client_id) {
        Ok(client) => (StatusCode::OK, Json(ClientMapper::to_dto(client))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Replace every field of a client
pub async fn update_client(
    State(state): State<AppState>,
    Path(client_id): Path<ClientId>,
    payload: Result<Json<ClientRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return json_rejection(rejection).into_response(),
    };
    info!("PUT /clients/{} - request: {:?}", client_id, request);

    match state
        .client_service
        .update_client(client_id, ClientMapper::to_command(request))
    {
        Ok(client) => (StatusCode::OK, Json(ClientMapper::to_dto(client))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a client together with their visit history
pub async fn delete_client(
    State(state): State<AppState>,
    Path(client_id): Path<ClientId>,
) -> Response {
    info!("DELETE /clients/{}", client_id);

    match state.client_service.delete_client(client_id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// Record a visit of a client to a bath
pub async fn record_visit(
    State(state): State<AppState>,
    Path(client_id): Path<ClientId>,
    payload: Result<Json<RecordVisitRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return json_rejection(rejection).into_response(),
    };
    info!("POST /clients/{}/visits - request: {:?}", client_id, request);

    let command = ClientMapper::to_visit_command(request);
    match state.client_service.record_visit(client_id, command) {
        Ok(visit) => (StatusCode::CREATED, Json(ClientMapper::to_visit_dto(visit))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Visit history of a client in recording order
pub async fn visit_history(
    State(state): State<AppState>,
    Path(client_id): Path<ClientId>,
) -> Response {
    info!("GET /clients/{}/visits", client_id);

    match state.client_service.visit_history(client_id) {
        Ok(visits) => (StatusCode::OK, Json(ClientMapper::to_history(visits))).into_response(),
        Err(e) => e.into_response(),
    }
}
