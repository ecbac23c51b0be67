//! Course registration core
//!
//! Domain types and ambient facilities shared by the store and the CLI:
//! - Student / Course entities keyed on their natural keys
//! - The enrollment relation and its per-student / per-course projections
//! - Input validation
//! - Structured errors (`ExError`) and the domain error enum
//! - The logging facility and its operation macros

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod rules;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, RegistrarError, Result};
pub use model::{
    Course, CourseId, Enrollment, EnrollmentIndex, NewCourse, NewStudent, Registration, Student,
};
