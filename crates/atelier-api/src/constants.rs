//! API constants

/// Prefix of every public API route
pub const API_PREFIX: &str = "/api";

/// Path of the generated OpenAPI document
pub const OPENAPI_PATH: &str = "/api/openapi.json";

/// Largest accepted request body. Contact messages are capped well below this.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Default server-level concurrency limit
pub const HTTP_CONCURRENCY_LIMIT: usize = 1_000;
