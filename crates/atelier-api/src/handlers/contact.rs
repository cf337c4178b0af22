use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use atelier_core::models::{ContactResponse, NewContactSubmission};

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;

/// Store a contact form submission and notify the site owner
#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "contact",
    request_body = NewContactSubmission,
    responses(
        (status = 201, description = "Submission stored", body = ContactResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse),
        (status = 500, description = "Submission could not be stored", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, payload))]
pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<NewContactSubmission>,
) -> Result<(StatusCode, Json<ContactResponse>), HttpAppError> {
    payload.validate()?;

    let submission = state.contacts.create(payload.trimmed()).await?;

    if let Some(notifier) = state.notifier.clone() {
        let stored = submission.clone();
        tokio::spawn(async move {
            if let Err(e) = notifier.notify(&stored).await {
                tracing::warn!(
                    error = %e,
                    submission_id = %stored.id,
                    "Failed to send contact notification"
                );
            }
        });
    }

    Ok((StatusCode::CREATED, Json(ContactResponse::from(&submission))))
}
