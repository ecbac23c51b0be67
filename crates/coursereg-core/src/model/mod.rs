//! Entity model: students, courses, and the enrollment relation between them

pub mod course;
pub mod enrollment;
pub mod student;

pub use course::{Course, CourseId, NewCourse};
pub use enrollment::{Enrollment, EnrollmentIndex, Registration};
pub use student::{NewStudent, Student};
