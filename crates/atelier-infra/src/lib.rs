//! Atelier Infrastructure Library
//!
//! Shared infrastructure used by the API server and the migration CLI:
//! - Telemetry initialization (tracing subscriber)
//! - Middleware (request ID, security headers)

#[cfg(feature = "middleware")]
pub mod middleware;

pub mod telemetry;

// Re-export commonly used types
#[cfg(feature = "middleware")]
pub use middleware::{
    get_request_id, request_id_middleware, security_headers_middleware, RequestId,
};

pub use telemetry::{init_cli_tracing, init_telemetry, LogFormat};
