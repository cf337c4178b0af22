//! Email validation endpoint tests.
//!
//! Run with: `cargo test -p atelier-api --test email_validation_test`

mod helpers;

use std::sync::Arc;

use atelier_services::MxLookup;
use axum::http::StatusCode;
use helpers::{setup_test_app, FixedResolver, TestAppBuilder};
use serde_json::Value;

#[tokio::test]
async fn test_valid_address_returns_200() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get("/api/validate-email")
        .add_query_param("email", "jane.doe@studio-client.io")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body, serde_json::json!({ "valid": true }));
}

#[tokio::test]
async fn test_rejected_address_returns_400_with_message() {
    let app = setup_test_app().await;

    let cases = [
        ("not-an-email", "Please enter a valid email address"),
        ("someone@mailinator.com", "Disposable email addresses are not allowed"),
        ("info@studio-client.io", "Please use a personal email address"),
        ("jane@example.com", "The email domain looks misspelled, please check it"),
    ];

    for (email, message) in cases {
        let response = app
            .client()
            .get("/api/validate-email")
            .add_query_param("email", email)
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{}", email);
        let body: Value = response.json();
        assert_eq!(body["valid"], false);
        assert_eq!(body["message"], message, "{}", email);
    }
}

#[tokio::test]
async fn test_missing_email_returns_400() {
    let app = setup_test_app().await;

    let response = app.client().get("/api/validate-email").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["valid"], false);
    assert_eq!(body["message"], "Email is required");

    let response = app
        .client()
        .get("/api/validate-email")
        .add_query_param("email", "   ")
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_surrounding_whitespace_is_ignored() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get("/api/validate-email")
        .add_query_param("email", "  jane.doe@studio-client.io ")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_domain_without_mail_server_is_rejected() {
    let app = TestAppBuilder::new()
        .resolver(Arc::new(FixedResolver(MxLookup::NoRecords)))
        .build()
        .await;

    let response = app
        .client()
        .get("/api/validate-email")
        .add_query_param("email", "jane@no-mail.studio-client.io")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "The email domain cannot receive mail");
}

#[tokio::test]
async fn test_failed_lookup_fails_open() {
    let app = TestAppBuilder::new()
        .resolver(Arc::new(FixedResolver(MxLookup::Failed(
            "request timed out".to_string(),
        ))))
        .build()
        .await;

    let response = app
        .client()
        .get("/api/validate-email")
        .add_query_param("email", "jane@slow-dns.studio-client.io")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_cors_only_echoes_listed_origins() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get("/api/validate-email")
        .add_query_param("email", "jane.doe@studio-client.io")
        .add_header("Origin", helpers::ALLOWED_ORIGIN)
        .await;
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some(helpers::ALLOWED_ORIGIN)
    );

    let response = app
        .client()
        .get("/api/validate-email")
        .add_query_param("email", "jane.doe@studio-client.io")
        .add_header("Origin", "https://elsewhere.test")
        .await;
    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}
