//! Database repositories for data access layer
//!
//! The only persisted record is the contact form submission. Handlers depend on the
//! `ContactStore` trait so they can run against an in-memory store in tests.

pub mod contact;

pub use contact::{ContactRepository, ContactStore};
