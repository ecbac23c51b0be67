//! Input validation applied before any store access

pub mod validation;

pub use validation::{validate_new_course, validate_new_student, validate_email};
