//! Integration tests for the GraphQL endpoint
//!
//! Exercise the HTTP handler, per-request loader wiring and error codes
//! without a database.

mod common;

use std::time::{Duration, Instant};

use axum::{body::Body, http::Request, http::StatusCode};
use red_airlines_api::build_router;
use tower::ServiceExt;

use common::{first_error_code, post_graphql, test_app, test_config, unreachable_pool};

#[tokio::test]
async fn test_typename_query_succeeds() {
    let (status, body) = post_graphql(test_app(), "{ __typename }").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["__typename"], "Query");
    assert!(body.get("errors").is_none());
}

#[tokio::test]
async fn test_database_outage_maps_to_database_error() {
    let (status, body) = post_graphql(test_app(), "{ airports }").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first_error_code(&body), Some("DATABASE_ERROR"));
    assert_eq!(
        body["errors"][0]["message"],
        "An unexpected error occurred"
    );
}

#[tokio::test]
async fn test_malformed_flight_id_is_validation_error() {
    let (_, body) = post_graphql(test_app(), r#"{ flight(id: "RA1234") { id } }"#).await;

    assert_eq!(first_error_code(&body), Some("VALIDATION_ERROR"));
    assert!(body["errors"][0]["message"]
        .as_str()
        .unwrap()
        .contains("invalid flight id"));
}

#[tokio::test]
async fn test_create_booking_validates_before_touching_database() {
    let query = r#"
        mutation {
            createBooking(input: {
                flightId: "0b6f7c1e-3f0a-4a59-9d0c-6f1f0d7c2a11",
                fareId: "5c1d2a9e-8b7f-4e0a-a3c4-1e2f3a4b5c6d",
                passengerName: "Ada Lovelace",
                passengerEmail: "not-an-email"
            }) {
                bookingReference
            }
        }
    "#;

    let (_, body) = post_graphql(test_app(), query).await;

    assert_eq!(first_error_code(&body), Some("VALIDATION_ERROR"));
    assert!(body["errors"][0]["message"]
        .as_str()
        .unwrap()
        .contains("passenger email"));
}

#[tokio::test]
async fn test_playground_is_served() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/graphql/playground")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(String::from_utf8_lossy(&body).contains("/graphql"));
}

#[tokio::test]
async fn test_request_deadline_returns_timeout_error() {
    let mut config = test_config();
    config.request_timeout_secs = 1;
    // Pool acquisition outlasts the request deadline
    let app = build_router(&config, unreachable_pool(Duration::from_secs(10)));

    let started = Instant::now();
    let (status, body) = post_graphql(app, "{ airports }").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first_error_code(&body), Some("TIMEOUT"));
    assert!(started.elapsed() < Duration::from_secs(5));
}
