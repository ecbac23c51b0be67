// Integration tests for seed import

use coursereg_core::ExErrorKind;
use coursereg_store::seed::{import_seed, import_seed_str};
use coursereg_store::{CourseRepository, Gateway, StudentRepository};
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_import_fixture() {
    let gateway = Gateway::open_in_memory().unwrap();
    let summary = import_seed(&fixture("seed_full.yaml"), &gateway).unwrap();

    assert_eq!(summary.courses, 5);
    assert_eq!(summary.students, 5);
    assert_eq!(summary.enrollments, 6);

    let students = StudentRepository::new(&gateway);
    let names: Vec<String> = students
        .enrolled_courses("ariadna@gmail.com")
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Java", "JPA", "Spring Framework"]);

    let courses = CourseRepository::new(&gateway).list_all().unwrap();
    let java = courses.iter().find(|c| c.name == "Java").unwrap();
    assert_eq!(java.students.len(), 2);
    assert!(java.contains_student("reema@gmail.com"));

    assert!(students.validate_credentials("bolaji@gmail.com", "password").unwrap());
}

#[test]
fn test_import_twice_fails_and_keeps_first() {
    let gateway = Gateway::open_in_memory().unwrap();
    import_seed(&fixture("seed_full.yaml"), &gateway).unwrap();

    let err = import_seed(&fixture("seed_full.yaml"), &gateway).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Persistence);

    // the duplicate run's courses were rolled back with it
    assert_eq!(CourseRepository::new(&gateway).list_all().unwrap().len(), 5);
    assert_eq!(StudentRepository::new(&gateway).list_all().unwrap().len(), 5);
}

#[test]
fn test_unknown_course_key_rejected_before_writing() {
    let gateway = Gateway::open_in_memory().unwrap();
    let yaml = r#"
schema_version: 0
courses:
  - key: algo
    name: Algo
    instructor: Dr. X
students:
  - email: a@x.com
    name: A
    password: pw
    courses: [algo, graphs]
"#;

    let err = import_seed_str(yaml, &gateway).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    assert!(err.message().contains("graphs"));
    assert!(CourseRepository::new(&gateway).list_all().unwrap().is_empty());
}

#[test]
fn test_empty_seed_imports_nothing() {
    let gateway = Gateway::open_in_memory().unwrap();
    let summary = import_seed_str("schema_version: 0\n", &gateway).unwrap();
    assert_eq!(summary.courses + summary.students + summary.enrollments, 0);
}

#[test]
fn test_missing_seed_file_is_io_error() {
    let gateway = Gateway::open_in_memory().unwrap();
    let err = import_seed(&fixture("no_such_seed.yaml"), &gateway).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Io);
}
