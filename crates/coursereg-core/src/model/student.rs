use coursereg_core_types::Sensitive;
use serde::Serialize;
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use super::course::CourseId;

/// A registered student, keyed by email
///
/// `courses` is the owning side of the enrollment relation: registration
/// writes go through the student. Equality and hashing use `email` only,
/// so a student can sit in a set while its course set is refreshed.
#[derive(Debug, Clone, Serialize)]
pub struct Student {
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password: Sensitive<String>,
    pub courses: BTreeSet<CourseId>,
}

impl Student {
    pub fn new(
        email: impl Into<String>,
        name: impl Into<String>,
        password: impl Into<Sensitive<String>>,
    ) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            password: password.into(),
            courses: BTreeSet::new(),
        }
    }

    pub fn is_enrolled_in(&self, course_id: CourseId) -> bool {
        self.courses.contains(&course_id)
    }
}

impl PartialEq for Student {
    fn eq(&self, other: &Self) -> bool {
        self.email == other.email
    }
}

impl Eq for Student {}

impl Hash for Student {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.email.hash(state);
    }
}

impl std::fmt::Display for Student {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Student[email: {}, name: {}]", self.email, self.name)
    }
}

/// Input for creating a student, optionally with an initial course set
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub email: String,
    pub name: String,
    pub password: Sensitive<String>,
    pub courses: BTreeSet<CourseId>,
}

impl NewStudent {
    pub fn new(
        email: impl Into<String>,
        name: impl Into<String>,
        password: impl Into<Sensitive<String>>,
    ) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            password: password.into(),
            courses: BTreeSet::new(),
        }
    }

    /// Supply an initial enrollment set
    pub fn with_courses(mut self, courses: impl IntoIterator<Item = CourseId>) -> Self {
        self.courses = courses.into_iter().collect();
        self
    }

    pub fn into_student(self) -> Student {
        Student {
            email: self.email,
            name: self.name,
            password: self.password,
            courses: self.courses,
        }
    }
}
