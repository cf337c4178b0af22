//! Data models for the application
//!
//! Contact submissions are the only persisted record; asset and email models
//! describe transient results passed between the services and their callers.

mod asset;
mod contact;
mod email;

pub use asset::*;
pub use contact::*;
pub use email::*;
