//! Request-level errors shared by the API crates.
//!
//! The service only fails in three ways: the client sent something unusable, the
//! database refused, or something unexpected went wrong. `ErrorMetadata` says how
//! each of those is presented over HTTP; rendering lives in the API crate.

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Client mistakes
    Debug,
    /// Server-side failures
    Error,
}

/// How an error is presented to clients and logs
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "DATABASE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether retrying the same request may succeed
    fn is_recoverable(&self) -> bool;

    fn suggested_action(&self) -> Option<&'static str>;

    /// Message safe to show a client
    fn client_message(&self) -> String;

    /// Whether details must stay out of responses
    fn is_sensitive(&self) -> bool;

    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[cfg(not(feature = "sqlx"))]
    #[error("Database error: {0}")]
    Database(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {message}")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::InvalidInput(format!("Validation error: {}", err))
    }
}

/// Fixed presentation of one error category
struct Presentation {
    status: u16,
    code: &'static str,
    recoverable: bool,
    suggested_action: Option<&'static str>,
    sensitive: bool,
    log_level: LogLevel,
}

const DATABASE: Presentation = Presentation {
    status: 500,
    code: "DATABASE_ERROR",
    recoverable: true,
    suggested_action: Some("Retry after a short delay"),
    sensitive: true,
    log_level: LogLevel::Error,
};

const INVALID_INPUT: Presentation = Presentation {
    status: 400,
    code: "INVALID_INPUT",
    recoverable: false,
    suggested_action: Some("Check request parameters and try again"),
    sensitive: false,
    log_level: LogLevel::Debug,
};

const INTERNAL: Presentation = Presentation {
    status: 500,
    code: "INTERNAL_ERROR",
    recoverable: true,
    suggested_action: Some("Retry after a short delay"),
    sensitive: true,
    log_level: LogLevel::Error,
};

impl AppError {
    fn presentation(&self) -> &'static Presentation {
        match self {
            AppError::Database(_) => &DATABASE,
            AppError::InvalidInput(_) => &INVALID_INPUT,
            AppError::InternalWithSource { .. } => &INTERNAL,
        }
    }

    /// Variant name reported alongside details outside production
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Database(_) => "Database",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// The error followed by up to five of its causes
    pub fn detailed_message(&self) -> String {
        let mut details = self.to_string();
        let mut causes = std::iter::successors(std::error::Error::source(self), |e| e.source());

        for cause in causes.by_ref().take(5) {
            details.push_str(&format!("\n  Caused by: {}", cause));
        }
        if causes.next().is_some() {
            details.push_str("\n  ... (truncated)");
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        self.presentation().status
    }

    fn error_code(&self) -> &'static str {
        self.presentation().code
    }

    fn is_recoverable(&self) -> bool {
        self.presentation().recoverable
    }

    fn suggested_action(&self) -> Option<&'static str> {
        self.presentation().suggested_action
    }

    fn is_sensitive(&self) -> bool {
        self.presentation().sensitive
    }

    fn log_level(&self) -> LogLevel {
        self.presentation().log_level
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Database(_) => "Failed to access database".to_string(),
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::InternalWithSource { .. } => "Internal server error".to_string(),
        }
    }
}
