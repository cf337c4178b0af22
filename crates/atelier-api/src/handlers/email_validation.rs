use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    Json,
};

use atelier_core::models::{EmailValidationQuery, EmailValidationResponse};

use crate::state::AppState;

const MISSING_EMAIL: &str = "Email is required";

/// Check whether an address looks deliverable
#[utoipa::path(
    get,
    path = "/api/validate-email",
    tag = "email",
    params(EmailValidationQuery),
    responses(
        (status = 200, description = "Address accepted", body = EmailValidationResponse),
        (status = 400, description = "Address rejected or missing", body = EmailValidationResponse)
    )
)]
#[tracing::instrument(skip(state, query))]
pub async fn validate_email(
    State(state): State<Arc<AppState>>,
    query: Result<Query<EmailValidationQuery>, QueryRejection>,
) -> (StatusCode, Json<EmailValidationResponse>) {
    let email = query
        .ok()
        .and_then(|Query(q)| q.email)
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty());

    let Some(email) = email else {
        return (
            StatusCode::BAD_REQUEST,
            Json(EmailValidationResponse {
                valid: false,
                message: Some(MISSING_EMAIL.to_string()),
            }),
        );
    };

    let verdict = state.email_validator.validate(&email).await;
    let status = if verdict.valid {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };

    (status, Json(EmailValidationResponse::from(verdict)))
}
