use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "sqlx")]
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Contact form submission as stored in `contact_submissions`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct ContactSubmission {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub query: String,
    pub created_at: DateTime<Utc>,
}

/// Request DTO for the contact form
#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct NewContactSubmission {
    #[validate(
        length(max = 200, message = "Name must be at most 200 characters"),
        custom(function = "not_blank", message = "Name is required")
    )]
    pub name: String,
    #[validate(
        length(max = 50, message = "Phone must be at most 50 characters"),
        custom(function = "not_blank", message = "Phone is required")
    )]
    pub phone: String,
    #[validate(
        length(max = 320, message = "Email must be at most 320 characters"),
        custom(function = "not_blank", message = "Email is required")
    )]
    pub email: String,
    #[validate(
        length(max = 5000, message = "Query must be at most 5000 characters"),
        custom(function = "not_blank", message = "Query is required")
    )]
    pub query: String,
}

impl NewContactSubmission {
    /// Copy with surrounding whitespace removed from every field
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            query: self.query.trim().to_string(),
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Response returned once a submission is stored
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
    pub id: Uuid,
}

impl From<&ContactSubmission> for ContactResponse {
    fn from(submission: &ContactSubmission) -> Self {
        ContactResponse {
            success: true,
            message: "Thank you for reaching out. We will get back to you soon.".to_string(),
            id: submission.id,
        }
    }
}
