use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Why an address was rejected by the validation pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectionReason {
    InvalidFormat,
    InvalidDomain,
    DisposableEmail,
    RoleBasedEmail,
    InvalidDomainSpelling,
    NoMailServer,
}

impl RejectionReason {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            RejectionReason::InvalidFormat => "INVALID_FORMAT",
            RejectionReason::InvalidDomain => "INVALID_DOMAIN",
            RejectionReason::DisposableEmail => "DISPOSABLE_EMAIL",
            RejectionReason::RoleBasedEmail => "ROLE_BASED_EMAIL",
            RejectionReason::InvalidDomainSpelling => "INVALID_DOMAIN_SPELLING",
            RejectionReason::NoMailServer => "NO_MAIL_SERVER",
        }
    }

    /// Message shown to the person filling in the form
    pub fn message(&self) -> &'static str {
        match self {
            RejectionReason::InvalidFormat => "Please enter a valid email address",
            RejectionReason::InvalidDomain => "The email domain is invalid",
            RejectionReason::DisposableEmail => "Disposable email addresses are not allowed",
            RejectionReason::RoleBasedEmail => "Please use a personal email address",
            RejectionReason::InvalidDomainSpelling => {
                "The email domain looks misspelled, please check it"
            }
            RejectionReason::NoMailServer => "The email domain cannot receive mail",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Outcome of validating one address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationVerdict {
    pub valid: bool,
    pub reason: Option<RejectionReason>,
}

impl ValidationVerdict {
    pub fn valid() -> Self {
        Self {
            valid: true,
            reason: None,
        }
    }

    pub fn rejected(reason: RejectionReason) -> Self {
        Self {
            valid: false,
            reason: Some(reason),
        }
    }
}

/// Query string of `GET /api/validate-email`
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmailValidationQuery {
    /// Address to check
    pub email: Option<String>,
}

/// Body returned by `GET /api/validate-email`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmailValidationResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<ValidationVerdict> for EmailValidationResponse {
    fn from(verdict: ValidationVerdict) -> Self {
        EmailValidationResponse {
            valid: verdict.valid,
            message: verdict.reason.map(|r| r.message().to_string()),
        }
    }
}
