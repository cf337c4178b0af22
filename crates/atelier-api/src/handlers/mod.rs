pub mod contact;
pub mod email_validation;
