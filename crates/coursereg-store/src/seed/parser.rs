//! Seed parser with validation
//!
//! Checks schema version, key uniqueness, references, and field validity
//! before anything touches the store.

use crate::errors::{io_error, seed_validation, Result};
use crate::seed::format_v0::SeedV0;
use coursereg_core::errors::{ExError, RegistrarError};
use coursereg_core::model::{NewCourse, NewStudent};
use coursereg_core::rules::{validate_new_course, validate_new_student};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Parse a seed file from a path
pub fn parse_seed_file(path: &Path) -> Result<SeedV0> {
    let content = fs::read_to_string(path).map_err(|e| io_error("seed_read", e))?;

    parse_seed_str(&content)
}

/// Parse a seed from a string
pub fn parse_seed_str(content: &str) -> Result<SeedV0> {
    let seed: SeedV0 = serde_yaml::from_str(content)
        .map_err(|e| seed_validation(&format!("YAML parse error: {}", e)))?;

    validate_seed(&seed)?;

    Ok(seed)
}

fn validate_seed(seed: &SeedV0) -> Result<()> {
    if seed.schema_version != 0 {
        return Err(seed_validation(&format!(
            "Unsupported schema_version: {}. Expected 0",
            seed.schema_version
        )));
    }

    let mut course_keys = HashSet::new();
    for course in &seed.courses {
        if !course_keys.insert(course.key.as_str()) {
            return Err(seed_validation(&format!(
                "Duplicate course key: {}",
                course.key
            )));
        }
        validate_new_course(&NewCourse::new(&course.name, &course.instructor))
            .map_err(|e| seed_validation(&format!("Course '{}': {}", course.key, e.message())))?;
    }

    let mut emails = HashSet::new();
    for student in &seed.students {
        if !emails.insert(student.email.as_str()) {
            let duplicate = RegistrarError::DuplicateStudent {
                email: student.email.clone(),
            };
            return Err(ExError::from(duplicate).with_op("seed_parse"));
        }

        let candidate = NewStudent::new(&student.email, &student.name, student.password.as_str());
        validate_new_student(&candidate).map_err(|e| {
            seed_validation(&format!("Student '{}': {}", student.email, e.message()))
        })?;

        for key in &student.courses {
            if !course_keys.contains(key.as_str()) {
                return Err(seed_validation(&format!(
                    "Student '{}' references unknown course key: {}",
                    student.email, key
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursereg_core::errors::ExErrorKind;

    #[test]
    fn test_minimal_seed() {
        let seed = parse_seed_str("schema_version: 0\n").unwrap();
        assert!(seed.courses.is_empty());
        assert!(seed.students.is_empty());
    }

    #[test]
    fn test_wrong_schema_version() {
        let err = parse_seed_str("schema_version: 2\n").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
        assert!(err.message().contains("schema_version"));
    }

    #[test]
    fn test_unknown_course_key() {
        let err = parse_seed_str(
            r#"
schema_version: 0
courses:
  - key: java
    name: Java
    instructor: Phillip Witkin
students:
  - email: a@x.com
    name: A
    password: pw
    courses: [python]
"#,
        )
        .unwrap_err();
        assert!(err.message().contains("unknown course key: python"));
    }

    #[test]
    fn test_duplicate_email() {
        let err = parse_seed_str(
            r#"
schema_version: 0
students:
  - { email: a@x.com, name: A, password: pw }
  - { email: a@x.com, name: B, password: pw }
"#,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
        assert_eq!(err.op(), Some("seed_parse"));
        assert_eq!(err.entity_id(), Some("a@x.com"));
        assert!(err.message().contains("Duplicate student email"));
    }

    #[test]
    fn test_invalid_student_email() {
        let err = parse_seed_str(
            r#"
schema_version: 0
students:
  - { email: not-an-email, name: A, password: pw }
"#,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
        assert!(err.message().contains("not-an-email"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = parse_seed_str("schema_version: 0\nteachers: []\n").unwrap_err();
        assert!(err.message().contains("YAML parse error"));
    }
}
