//! End-to-end tests driving the router in-process.

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::time::Duration;
use tower::ServiceExt;

use baths_backend::config::AppConfig;
use baths_backend::storage::MemoryConnection;
use baths_backend::{create_router, initialize_backend};

struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl TestResponse {
    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("Failed to parse response body as JSON")
    }

    fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("Response body is not UTF-8")
    }

    fn last_modified(&self) -> String {
        self.headers
            .get(header::LAST_MODIFIED)
            .expect("Missing Last-Modified header")
            .to_str()
            .expect("Last-Modified is not ASCII")
            .to_string()
    }
}

fn setup_test() -> Router {
    create_router(initialize_backend(MemoryConnection::new()), &AppConfig::default())
}

async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to call router");
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body")
        .to_vec();
    TestResponse { status, headers, body }
}

fn request(
    method: Method,
    uri: &str,
    headers: &[(header::HeaderName, &str)],
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(name, *value);
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("Failed to build request"),
        None => builder.body(Body::empty()).expect("Failed to build request"),
    }
}

async fn get(app: &Router, uri: &str) -> TestResponse {
    send(app, request(Method::GET, uri, &[], None)).await
}

async fn post(app: &Router, uri: &str, body: Value) -> TestResponse {
    send(app, request(Method::POST, uri, &[], Some(body))).await
}

fn bath_body(name: &str, bath_type: &str) -> Value {
    json!({
        "name": name,
        "location": "North wing",
        "type": bath_type,
        "maintenanceDone": false,
        "minTemperature": 30.0,
        "maxTemperature": 40.0
    })
}

fn client_body(first: &str, last: &str, email: &str) -> Value {
    json!({
        "firstName": first,
        "lastName": last,
        "email": email,
        "phone": "+420 123 456 789"
    })
}

async fn tick() {
    tokio::time::sleep(Duration::from_millis(2)).await;
}

#[tokio::test]
async fn test_create_then_get_bath() {
    let app = setup_test();

    let created = post(&app, "/baths", bath_body("Thermal A", "HOT")).await;
    assert_eq!(created.status, StatusCode::CREATED);
    let stamp = created.last_modified();
    let bath = created.json();
    assert_eq!(bath["id"], 1);
    assert_eq!(bath["type"], "hot");
    assert_eq!(bath["isActive"], true);

    let fetched = get(&app, "/baths/1").await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.json(), bath);
    assert_eq!(fetched.last_modified(), stamp);
}

#[tokio::test]
async fn test_create_forces_active() {
    let app = setup_test();

    let mut body = bath_body("Thermal A", "cold");
    body["isActive"] = json!(false);
    let created = post(&app, "/baths", body).await;

    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.json()["isActive"], true);
}

#[tokio::test]
async fn test_create_bath_validation() {
    let app = setup_test();

    let mut missing = bath_body("Thermal A", "hot");
    missing.as_object_mut().unwrap().remove("location");
    let response = post(&app, "/baths", missing).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.text().contains("location"));

    let response = post(&app, "/baths", bath_body("Thermal A", "lukewarm")).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let mut inverted = bath_body("Thermal A", "hot");
    inverted["minTemperature"] = json!(45.0);
    let response = post(&app, "/baths", inverted).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    assert_eq!(get(&app, "/baths").await.json(), json!([]));
}

#[tokio::test]
async fn test_get_not_modified_on_matching_stamp() {
    let app = setup_test();
    let stamp = post(&app, "/baths", bath_body("Thermal A", "hot")).await.last_modified();

    let response = send(
        &app,
        request(Method::GET, "/baths/1", &[(header::IF_MODIFIED_SINCE, stamp.as_str())], None),
    )
    .await;
    assert_eq!(response.status, StatusCode::NOT_MODIFIED);
    assert!(response.body.is_empty());

    let response = send(
        &app,
        request(
            Method::GET,
            "/baths/1",
            &[(header::IF_MODIFIED_SINCE, "2000-01-01T00:00:00")],
            None,
        ),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["name"], "Thermal A");
}

#[tokio::test]
async fn test_get_missing_bath_with_header_is_not_found() {
    let app = setup_test();

    let response = send(
        &app,
        request(
            Method::GET,
            "/baths/42",
            &[(header::IF_MODIFIED_SINCE, "2025-01-01T00:00:00")],
            None,
        ),
    )
    .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_not_modified_until_collection_changes() {
    let app = setup_test();
    post(&app, "/baths", bath_body("Thermal A", "hot")).await;

    let listed = get(&app, "/baths").await;
    assert_eq!(listed.status, StatusCode::OK);
    let stamp = listed.last_modified();

    let response = send(
        &app,
        request(Method::GET, "/baths", &[(header::IF_MODIFIED_SINCE, stamp.as_str())], None),
    )
    .await;
    assert_eq!(response.status, StatusCode::NOT_MODIFIED);

    tick().await;
    post(&app, "/baths", bath_body("Thermal B", "indoor")).await;

    let response = send(
        &app,
        request(Method::GET, "/baths", &[(header::IF_MODIFIED_SINCE, stamp.as_str())], None),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    let ids: Vec<u64> = response
        .json()
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn test_update_with_stale_stamp_is_rejected() {
    let app = setup_test();
    let stamp = post(&app, "/baths", bath_body("Thermal A", "hot")).await.last_modified();

    let response = send(
        &app,
        request(
            Method::PUT,
            "/baths/1",
            &[(header::IF_UNMODIFIED_SINCE, "2000-01-01T00:00:00")],
            Some(bath_body("Renamed", "cold")),
        ),
    )
    .await;
    assert_eq!(response.status, StatusCode::PRECONDITION_FAILED);

    let unchanged = get(&app, "/baths/1").await;
    assert_eq!(unchanged.json()["name"], "Thermal A");
    assert_eq!(unchanged.last_modified(), stamp);
}

#[tokio::test]
async fn test_update_with_current_stamp() {
    let app = setup_test();
    let stamp = post(&app, "/baths", bath_body("Thermal A", "hot")).await.last_modified();
    tick().await;

    let mut body = bath_body("Renamed", "outdoor");
    body["isActive"] = json!(false);
    let updated = send(
        &app,
        request(
            Method::PUT,
            "/baths/1",
            &[(header::IF_UNMODIFIED_SINCE, stamp.as_str())],
            Some(body),
        ),
    )
    .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_ne!(updated.last_modified(), stamp);
    let bath = updated.json();
    assert_eq!(bath["name"], "Renamed");
    assert_eq!(bath["type"], "outdoor");
    assert_eq!(bath["isActive"], false);

    // The old stamp is no longer current
    let response = send(
        &app,
        request(
            Method::PUT,
            "/baths/1",
            &[(header::IF_UNMODIFIED_SINCE, stamp.as_str())],
            Some(bath_body("Again", "hot")),
        ),
    )
    .await;
    assert_eq!(response.status, StatusCode::PRECONDITION_FAILED);
}

#[tokio::test]
async fn test_update_missing_bath_is_not_found() {
    let app = setup_test();

    let response = send(
        &app,
        request(Method::PUT, "/baths/9", &[], Some(bath_body("Thermal A", "hot"))),
    )
    .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_bath_cascades_measurements() {
    let app = setup_test();
    post(&app, "/baths", bath_body("Thermal A", "hot")).await;

    let recorded = post(
        &app,
        "/baths/1/measurements",
        json!({"temperature": 36.5, "measuredAt": "2025-03-01T08:30:00"}),
    )
    .await;
    assert_eq!(recorded.status, StatusCode::CREATED);
    assert_eq!(
        recorded.json(),
        json!({"bathId": 1, "temperature": 36.5, "measuredAt": "2025-03-01T08:30:00"})
    );
    assert_eq!(get(&app, "/baths/1/measurements").await.json().as_array().unwrap().len(), 1);

    let deleted = send(&app, request(Method::DELETE, "/baths/1", &[], None)).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    assert_eq!(get(&app, "/baths/1").await.status, StatusCode::NOT_FOUND);
    assert_eq!(get(&app, "/baths/1/measurements").await.status, StatusCode::NOT_FOUND);
    let again = send(&app, request(Method::DELETE, "/baths/1", &[], None)).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_with_stale_stamp_keeps_bath() {
    let app = setup_test();
    post(&app, "/baths", bath_body("Thermal A", "hot")).await;

    let response = send(
        &app,
        request(
            Method::DELETE,
            "/baths/1",
            &[(header::IF_UNMODIFIED_SINCE, "2000-01-01T00:00:00")],
            None,
        ),
    )
    .await;
    assert_eq!(response.status, StatusCode::PRECONDITION_FAILED);
    assert_eq!(get(&app, "/baths/1").await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_measurement_validation() {
    let app = setup_test();
    post(&app, "/baths", bath_body("Thermal A", "hot")).await;

    let response = post(
        &app,
        "/baths/1/measurements",
        json!({"measuredAt": "2025-03-01T08:30"}),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.text().contains("temperature"));

    let response = post(
        &app,
        "/baths/1/measurements",
        json!({"temperature": 30.0, "measuredAt": "yesterday"}),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = post(
        &app,
        "/baths/5/measurements",
        json!({"temperature": 30.0, "measuredAt": "2025-03-01T08:30"}),
    )
    .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_parent_is_reported_before_bad_timestamp() {
    let app = setup_test();
    post(&app, "/baths", bath_body("Thermal A", "hot")).await;
    post(&app, "/clients", client_body("Ana", "Novak", "ana@example.com")).await;

    let measurement = post(
        &app,
        "/baths/99/measurements",
        json!({"temperature": 30, "measuredAt": "yesterday"}),
    )
    .await;
    assert_eq!(measurement.status, StatusCode::NOT_FOUND);

    let visit = post(
        &app,
        "/clients/99/visits",
        json!({"bathId": 1, "visitedAt": "yesterday"}),
    )
    .await;
    assert_eq!(visit.status, StatusCode::NOT_FOUND);

    // Same bodies against existing parents fail on the timestamp
    let measurement = post(
        &app,
        "/baths/1/measurements",
        json!({"temperature": 30, "measuredAt": "yesterday"}),
    )
    .await;
    assert_eq!(measurement.status, StatusCode::BAD_REQUEST);
    assert!(measurement.text().contains("measuredAt"));

    let visit = post(
        &app,
        "/clients/1/visits",
        json!({"bathId": 1, "visitedAt": "yesterday"}),
    )
    .await;
    assert_eq!(visit.status, StatusCode::BAD_REQUEST);
    assert!(visit.text().contains("visitedAt"));
    assert_eq!(get(&app, "/clients/1/visits").await.json(), json!([]));
}

#[tokio::test]
async fn test_client_email_conflict_ignores_case() {
    let app = setup_test();

    let created = post(&app, "/clients", client_body("Ana", "Novak", "ana@example.com")).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.json()["id"], 1);

    let duplicate = post(&app, "/clients", client_body("Other", "Person", "ANA@Example.com")).await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
    assert_eq!(get(&app, "/clients").await.json().as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_client_keeps_own_email_and_frees_old_one() {
    let app = setup_test();
    post(&app, "/clients", client_body("Ana", "Novak", "ana@example.com")).await;
    post(&app, "/clients", client_body("Ben", "Svoboda", "ben@example.com")).await;

    let same_email = send(
        &app,
        request(
            Method::PUT,
            "/clients/1",
            &[],
            Some(client_body("Anna", "Novak", "ANA@example.com")),
        ),
    )
    .await;
    assert_eq!(same_email.status, StatusCode::OK);
    assert_eq!(same_email.json()["firstName"], "Anna");

    let taken = send(
        &app,
        request(
            Method::PUT,
            "/clients/1",
            &[],
            Some(client_body("Anna", "Novak", "ben@example.com")),
        ),
    )
    .await;
    assert_eq!(taken.status, StatusCode::CONFLICT);

    let moved = send(
        &app,
        request(
            Method::PUT,
            "/clients/1",
            &[],
            Some(client_body("Anna", "Novak", "anna@example.com")),
        ),
    )
    .await;
    assert_eq!(moved.status, StatusCode::OK);

    let reused = post(&app, "/clients", client_body("Cyril", "Dvorak", "ana@example.com")).await;
    assert_eq!(reused.status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_list_clients_filters_by_name() {
    let app = setup_test();
    post(&app, "/clients", client_body("Ana", "Novak", "a@example.com")).await;
    post(&app, "/clients", client_body("Ana", "Svoboda", "b@example.com")).await;
    post(&app, "/clients", client_body("Ben", "Novak", "c@example.com")).await;

    let by_first = get(&app, "/clients?firstName=Ana").await.json();
    assert_eq!(by_first.as_array().unwrap().len(), 2);

    let by_both = get(&app, "/clients?firstName=Ana&lastName=Novak").await.json();
    assert_eq!(by_both.as_array().unwrap().len(), 1);
    assert_eq!(by_both[0]["email"], "a@example.com");

    let any_case = get(&app, "/clients?lastName=novak").await.json();
    assert_eq!(any_case.as_array().unwrap().len(), 2);

    let none = get(&app, "/clients?firstName=An").await.json();
    assert_eq!(none, json!([]));

    let all = get(&app, "/clients").await.json();
    assert_eq!(all.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_visits_flow() {
    let app = setup_test();
    post(&app, "/baths", bath_body("Thermal A", "hot")).await;
    post(&app, "/clients", client_body("Ana", "Novak", "ana@example.com")).await;

    let unknown_bath = post(
        &app,
        "/clients/1/visits",
        json!({"bathId": 99, "visitedAt": "2025-04-01T10:00:00"}),
    )
    .await;
    assert_eq!(unknown_bath.status, StatusCode::NOT_FOUND);

    let unknown_client = post(
        &app,
        "/clients/7/visits",
        json!({"bathId": 1, "visitedAt": "2025-04-01T10:00:00"}),
    )
    .await;
    assert_eq!(unknown_client.status, StatusCode::NOT_FOUND);

    let recorded = post(
        &app,
        "/clients/1/visits",
        json!({"bathId": 1, "visitedAt": "2025-04-01T10:00:00"}),
    )
    .await;
    assert_eq!(recorded.status, StatusCode::CREATED);
    assert_eq!(
        recorded.json(),
        json!({"id": 1, "clientId": 1, "bathId": 1, "visitedAt": "2025-04-01T10:00:00"})
    );

    let history = get(&app, "/clients/1/visits").await;
    assert_eq!(history.status, StatusCode::OK);
    assert_eq!(
        history.json(),
        json!([{"id": 1, "bathId": 1, "visitedAt": "2025-04-01T10:00:00"}])
    );

    // History survives the bath going away
    send(&app, request(Method::DELETE, "/baths/1", &[], None)).await;
    assert_eq!(get(&app, "/clients/1/visits").await.json().as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_client_cascades_visits() {
    let app = setup_test();
    post(&app, "/baths", bath_body("Thermal A", "hot")).await;
    post(&app, "/clients", client_body("Ana", "Novak", "ana@example.com")).await;
    post(
        &app,
        "/clients/1/visits",
        json!({"bathId": 1, "visitedAt": "2025-04-01T10:00:00"}),
    )
    .await;

    let deleted = send(&app, request(Method::DELETE, "/clients/1", &[], None)).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    assert_eq!(get(&app, "/clients/1").await.status, StatusCode::NOT_FOUND);
    assert_eq!(get(&app, "/clients/1/visits").await.status, StatusCode::NOT_FOUND);

    let reused = post(&app, "/clients", client_body("Ana", "Novak", "ana@example.com")).await;
    assert_eq!(reused.status, StatusCode::CREATED);
    assert_eq!(reused.json()["id"], 2);
}

#[tokio::test]
async fn test_malformed_input_is_bad_request() {
    let app = setup_test();
    post(&app, "/baths", bath_body("Thermal A", "hot")).await;

    let bad_json = send(
        &app,
        Request::builder()
            .method(Method::POST)
            .uri("/baths")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .expect("Failed to build request"),
    )
    .await;
    assert_eq!(bad_json.status, StatusCode::BAD_REQUEST);

    let wrong_type = post(&app, "/baths", json!({"name": 5})).await;
    assert_eq!(wrong_type.status, StatusCode::BAD_REQUEST);

    let bad_header = send(
        &app,
        request(
            Method::GET,
            "/baths/1",
            &[(header::IF_MODIFIED_SINCE, "Wed, 21 Oct 2015 07:28:00 GMT")],
            None,
        ),
    )
    .await;
    assert_eq!(bad_header.status, StatusCode::BAD_REQUEST);

    let bad_id = get(&app, "/baths/abc").await;
    assert_eq!(bad_id.status, StatusCode::BAD_REQUEST);
}
