// Property tests: registration sequences keep both projections consistent,
// and credential checks accept only the exact stored pair

use coursereg_core::{NewCourse, NewStudent, Registration};
use coursereg_store::{CourseRepository, Gateway, StudentRepository};
use proptest::prelude::*;
use std::collections::BTreeSet;

const EMAILS: [&str; 4] = ["a@x.com", "b@x.com", "c@x.com", "d@x.com"];
const COURSES: usize = 3;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_registrations_behave_as_a_set(
        ops in prop::collection::vec((0..EMAILS.len(), 0..COURSES), 0..24)
    ) {
        let gateway = Gateway::open_in_memory().unwrap();
        let students = StudentRepository::new(&gateway);
        let courses = CourseRepository::new(&gateway);

        for email in EMAILS {
            students.create(NewStudent::new(email, "N", "pw")).unwrap();
        }
        let ids: Vec<i64> = (0..COURSES)
            .map(|i| courses.create(NewCourse::new(format!("C{}", i), "Staff")).unwrap().id)
            .collect();

        let mut expected: BTreeSet<(usize, usize)> = BTreeSet::new();
        for (s, c) in ops {
            let outcome = students.register_student_to_course(EMAILS[s], ids[c]).unwrap();
            let fresh = expected.insert((s, c));
            prop_assert_eq!(outcome == Registration::Enrolled, fresh);
        }

        for (s, email) in EMAILS.iter().enumerate() {
            let owned = students.find_by_email(email).unwrap().courses;
            let want: BTreeSet<i64> = expected
                .iter()
                .filter(|(es, _)| *es == s)
                .map(|(_, c)| ids[*c])
                .collect();
            prop_assert_eq!(&owned, &want);

            let joined: BTreeSet<i64> = students
                .enrolled_courses(email)
                .unwrap()
                .into_iter()
                .map(|c| c.id)
                .collect();
            prop_assert_eq!(&joined, &want);
        }

        for course in courses.list_all().unwrap() {
            for email in EMAILS {
                let owned = students.find_by_email(email).unwrap().is_enrolled_in(course.id);
                prop_assert_eq!(course.contains_student(email), owned);
            }
        }
    }

    #[test]
    fn prop_failed_registration_changes_nothing(missing in 100i64..10_000) {
        let gateway = Gateway::open_in_memory().unwrap();
        let students = StudentRepository::new(&gateway);
        let course = CourseRepository::new(&gateway)
            .create(NewCourse::new("Algo", "Dr. X"))
            .unwrap();
        students.create(NewStudent::new("a@x.com", "A", "pw")).unwrap();
        students.register_student_to_course("a@x.com", course.id).unwrap();

        prop_assert!(students.register_student_to_course("a@x.com", missing).is_err());
        let after = students.find_by_email("a@x.com").unwrap().courses;
        prop_assert_eq!(after.into_iter().collect::<Vec<_>>(), vec![course.id]);
    }

    #[test]
    fn prop_credentials_match_only_exactly(
        password in "[A-Za-z0-9]{1,12}",
        attempt in "[A-Za-z0-9]{1,12}",
    ) {
        let gateway = Gateway::open_in_memory().unwrap();
        let students = StudentRepository::new(&gateway);
        students
            .create(NewStudent::new("a@x.com", "A", password.as_str()))
            .unwrap();

        prop_assert!(students.validate_credentials("a@x.com", &password).unwrap());
        prop_assert_eq!(
            students.validate_credentials("a@x.com", &attempt).unwrap(),
            attempt == password
        );
        prop_assert!(!students.validate_credentials("b@x.com", &password).unwrap());
    }
}
