//! # REST API for Bath Management
//!
//! Endpoints for creating, retrieving, updating and deleting baths, plus the
//! temperature measurements recorded against them.
//!
//! Single-bath reads and the collection read honor `If-Modified-Since`;
//! updates and deletes honor `If-Unmodified-Since`. Every successful
//! create, read or update carries `Last-Modified`.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use tracing::info;

use super::conditional::{if_modified_since, if_unmodified_since, last_modified};
use super::error::json_rejection;
use super::mappers::BathMapper;
use crate::domain::models::BathId;
use crate::AppState;
use shared::{BathRequest, RecordMeasurementRequest};

/// Create a new bath
pub async fn create_bath(
    State(state): State<AppState>,
    payload: Result<Json<BathRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return json_rejection(rejection).into_response(),
    };
    info!("POST /baths - request: {:?}", request);

    match state.bath_service.create_bath(BathMapper::to_command(request)) {
        Ok(created) => (
            StatusCode::CREATED,
            last_modified(&created.last_modified),
            Json(BathMapper::to_dto(created.value)),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// List all baths
pub async fn list_baths(State(state): State<AppState>, headers: HeaderMap) -> Response {
    info!("GET /baths");

    let since = match if_modified_since(&headers) {
        Ok(since) => since,
        Err(e) => return e.into_response(),
    };

    match state.bath_service.list_baths(since) {
        Ok(listed) => (
            StatusCode::OK,
            last_modified(&listed.last_modified),
            Json(BathMapper::to_dto_list(listed.value)),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a bath by ID
pub async fn get_bath(
    State(state): State<AppState>,
    Path(bath_id): Path<BathId>,
    headers: HeaderMap,
) -> Response {
    info!("GET /baths/{}", bath_id);

    let since = match if_modified_since(&headers) {
        Ok(since) => since,
        Err(e) => return e.into_response(),
    };

    match state.bath_service.get_bath(bath_id, since) {
        Ok(found) => (
            StatusCode::OK,
            last_modified(&found.last_modified),
            Json(BathMapper::to_dto(found.value)),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Replace every field of a bath
pub async fn update_bath(
    State(state): State<AppState>,
    Path(bath_id): Path<BathId>,
    headers: HeaderMap,
    payload: Result<Json<BathRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return json_rejection(rejection).into_response(),
    };
    info!("PUT /baths/{} - request: {:?}", bath_id, request);

    let since = match if_unmodified_since(&headers) {
        Ok(since) => since,
        Err(e) => return e.into_response(),
    };

    match state
        .bath_service
        .update_bath(bath_id, since, BathMapper::to_command(request))
    {
        Ok(updated) => (
            StatusCode::OK,
            last_modified(&updated.last_modified),
            Json(BathMapper::to_dto(updated.value)),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a bath together with its measurements
pub async fn delete_bath(
    State(state): State<AppState>,
    Path(bath_id): Path<BathId>,
    headers: HeaderMap,
) -> Response {
    info!("DELETE /baths/{}", bath_id);

    let since = match if_unmodified_since(&headers) {
        Ok(since) => since,
        Err(e) => return e.into_response(),
    };

    match state.bath_service.delete_bath(bath_id, since) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// Record a temperature measurement for a bath
pub async fn record_measurement(
    State(state): State<AppState>,
    Path(bath_id): Path<BathId>,
    payload: Result<Json<RecordMeasurementRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return json_rejection(rejection).into_response(),
    };
    info!("POST /baths/{}/measurements - request: {:?}", bath_id, request);

    let command = BathMapper::to_measurement_command(request);
    match state.bath_service.record_measurement(bath_id, command) {
        Ok(measurement) => (
            StatusCode::CREATED,
            Json(BathMapper::to_measurement_dto(measurement)),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// List the measurements of a bath in recording order
pub async fn list_measurements(
    State(state): State<AppState>,
    Path(bath_id): Path<BathId>,
) -> Response {
    info!("GET /baths/{}/measurements", bath_id);

    match state.bath_service.list_measurements(bath_id) {
        Ok(measurements) => {
            let body: Vec<_> = measurements
                .into_iter()
                .map(BathMapper::to_measurement_dto)
                .collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => e.into_response(),
    }
}
