//! Repositories over the persistence gateway

pub mod course_repo;
pub(crate) mod rows;
pub mod student_repo;

pub use course_repo::CourseRepository;
pub use student_repo::StudentRepository;
