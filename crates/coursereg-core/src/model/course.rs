use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

/// Store-assigned course identifier
pub type CourseId = i64;

/// A course offering
///
/// `students` is the inverse side of the enrollment relation: a read
/// projection of the join table, never written through. Equality and
/// hashing use `id` only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    pub instructor: String,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub students: BTreeSet<String>,
}

impl Course {
    pub fn new(id: CourseId, name: impl Into<String>, instructor: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            instructor: instructor.into(),
            students: BTreeSet::new(),
        }
    }

    /// Check whether the given student email is enrolled
    pub fn contains_student(&self, email: &str) -> bool {
        self.students.contains(email)
    }
}

impl PartialEq for Course {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Course {}

impl Hash for Course {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for Course {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Course[id: {}, name: {}, instructor: {}]",
            self.id, self.name, self.instructor
        )
    }
}

/// Input for creating a course; the store assigns the id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCourse {
    pub name: String,
    pub instructor: String,
}

impl NewCourse {
    pub fn new(name: impl Into<String>, instructor: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instructor: instructor.into(),
        }
    }

    /// Attach the store-assigned id
    pub fn into_course(self, id: CourseId) -> Course {
        Course::new(id, self.name, self.instructor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_equality_ignores_enrollment_projection() {
        let plain = Course::new(1, "Algo", "Dr. X");
        let mut enrolled = plain.clone();
        enrolled.students.insert("a@x.com".to_string());

        assert_eq!(plain, enrolled);

        let mut set = HashSet::new();
        set.insert(plain);
        assert!(set.contains(&enrolled));
    }

    #[test]
    fn test_display_omits_students() {
        let mut course = Course::new(2, "Java", "Phillip Witkin");
        course.students.insert("a@x.com".to_string());
        assert_eq!(
            course.to_string(),
            "Course[id: 2, name: Java, instructor: Phillip Witkin]"
        );
    }

    #[test]
    fn test_empty_students_not_serialized() {
        let json = serde_json::to_value(Course::new(1, "Algo", "Dr. X")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 1, "name": "Algo", "instructor": "Dr. X"})
        );
    }
}
