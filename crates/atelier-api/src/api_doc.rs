//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use atelier_core::models;

/// Returns the OpenAPI document served at `/api/openapi.json`.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Atelier API",
        version = "0.1.0",
        description = "Website backend: contact form submissions and email address validation."
    ),
    paths(
        handlers::contact::submit_contact,
        handlers::email_validation::validate_email,
    ),
    components(schemas(
        models::NewContactSubmission,
        models::ContactResponse,
        models::EmailValidationResponse,
        models::RejectionReason,
        error::ErrorResponse,
    )),
    tags(
        (name = "contact", description = "Contact form"),
        (name = "email", description = "Email address validation")
    )
)]
pub struct ApiDoc;
