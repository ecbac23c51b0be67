//! The enrollment relation and its two read projections
//!
//! The join table is the single source of truth. `EnrollmentIndex` folds a
//! batch of join rows into per-student and per-course views so that
//! listings can attach `Student::courses` and `Course::students` without
//! keeping two mutable collections in sync.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::course::{Course, CourseId};
use super::student::Student;

/// One row of the join relation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Enrollment {
    pub student_email: String,
    pub course_id: CourseId,
}

impl Enrollment {
    pub fn new(student_email: impl Into<String>, course_id: CourseId) -> Self {
        Self {
            student_email: student_email.into(),
            course_id,
        }
    }
}

/// Outcome of a registration request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Registration {
    /// A new join row was written
    Enrolled,
    /// The pair already existed; nothing was written
    AlreadyEnrolled,
}

impl Registration {
    pub fn is_new(&self) -> bool {
        matches!(self, Registration::Enrolled)
    }
}

/// Both projections of a set of join rows
#[derive(Debug, Clone, Default)]
pub struct EnrollmentIndex {
    by_student: BTreeMap<String, BTreeSet<CourseId>>,
    by_course: BTreeMap<CourseId, BTreeSet<String>>,
}

impl EnrollmentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pair; duplicates collapse
    pub fn insert(&mut self, enrollment: Enrollment) {
        self.by_course
            .entry(enrollment.course_id)
            .or_default()
            .insert(enrollment.student_email.clone());
        self.by_student
            .entry(enrollment.student_email)
            .or_default()
            .insert(enrollment.course_id);
    }

    pub fn courses_of(&self, email: &str) -> BTreeSet<CourseId> {
        self.by_student.get(email).cloned().unwrap_or_default()
    }

    pub fn students_of(&self, course_id: CourseId) -> BTreeSet<String> {
        self.by_course.get(&course_id).cloned().unwrap_or_default()
    }

    /// Number of distinct pairs
    pub fn len(&self) -> usize {
        self.by_student.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_student.is_empty()
    }

    /// Replace each student's course set with the indexed view
    pub fn attach_to_students(&self, students: &mut [Student]) {
        for student in students {
            student.courses = self.courses_of(&student.email);
        }
    }

    /// Replace each course's student set with the indexed view
    pub fn attach_to_courses(&self, courses: &mut [Course]) {
        for course in courses {
            course.students = self.students_of(course.id);
        }
    }
}

impl FromIterator<Enrollment> for EnrollmentIndex {
    fn from_iter<I: IntoIterator<Item = Enrollment>>(iter: I) -> Self {
        let mut index = Self::new();
        for enrollment in iter {
            index.insert(enrollment);
        }
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projections_agree() {
        let index: EnrollmentIndex = [
            Enrollment::new("a@x.com", 1),
            Enrollment::new("a@x.com", 2),
            Enrollment::new("b@x.com", 1),
        ]
        .into_iter()
        .collect();

        assert_eq!(index.courses_of("a@x.com"), BTreeSet::from([1, 2]));
        assert_eq!(
            index.students_of(1),
            BTreeSet::from(["a@x.com".to_string(), "b@x.com".to_string()])
        );
        assert!(index.students_of(99).is_empty());
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_duplicate_pairs_collapse() {
        let index: EnrollmentIndex = [Enrollment::new("a@x.com", 1), Enrollment::new("a@x.com", 1)]
            .into_iter()
            .collect();
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_attach_overwrites_stale_sets() {
        let index: EnrollmentIndex = [Enrollment::new("a@x.com", 2)].into_iter().collect();

        let mut students = vec![Student::new("a@x.com", "A", "pw"), Student::new("c@x.com", "C", "pw")];
        students[1].courses.insert(7);
        index.attach_to_students(&mut students);
        assert_eq!(students[0].courses, BTreeSet::from([2]));
        assert!(students[1].courses.is_empty());

        let mut courses = vec![Course::new(2, "Algo", "Dr. X")];
        index.attach_to_courses(&mut courses);
        assert!(courses[0].contains_student("a@x.com"));
    }
}
