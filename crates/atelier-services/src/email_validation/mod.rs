//! Email address plausibility checks for the contact form.

pub mod lists;
mod resolver;
mod validator;

#[cfg(feature = "dns")]
pub use resolver::DnsMxResolver;
pub use resolver::{MxLookup, MxResolver};
pub use validator::{check_static, EmailValidator};
