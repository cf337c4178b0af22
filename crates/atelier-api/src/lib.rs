//! Atelier API Library
//!
//! HTTP handlers, application state and setup for the website backend:
//! email validation and the contact form.

mod api_doc;
pub mod constants;
mod handlers;
pub mod services;
pub mod setup;

// Public modules
pub mod error;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use services::notification::{ContactNotifier, EmailService};
pub use state::AppState;
