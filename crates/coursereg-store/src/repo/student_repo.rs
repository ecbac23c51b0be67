//! Student repository
//!
//! Students own the enrollment relation: registration and initial course
//! sets are written through here. Reads that return a `Student` always
//! carry its course-id projection.

use crate::errors::{persistence_failure, query_failure, Result};
use crate::gateway::Gateway;
use crate::repo::course_repo::load_course;
use crate::repo::rows;
use coursereg_core::errors::{ExError, RegistrarError};
use coursereg_core::model::{Course, CourseId, NewStudent, Registration, Student};
use coursereg_core::rules::validate_new_student;
use coursereg_core::{log_op_end, log_op_error, log_op_start};
use rusqlite::Connection;
use std::time::Instant;

pub struct StudentRepository<'g> {
    gateway: &'g Gateway,
}

impl<'g> StudentRepository<'g> {
    pub fn new(gateway: &'g Gateway) -> Self {
        Self { gateway }
    }

    /// Persist a new student together with its initial course set
    ///
    /// # Errors
    /// - `InvalidInput` if email, name or password fail validation
    /// - `NotFound` if an initial course id does not exist
    /// - `Persistence` on a duplicate email or any other write failure
    ///
    /// All failures roll back the whole insert.
    pub fn create(&self, student: NewStudent) -> Result<Student> {
        log_op_start!("create_student", student_email = student.email.as_str());
        let start = Instant::now();
        let email = student.email.clone();

        let result = validate_new_student(&student).and_then(|()| {
            self.gateway
                .with_transaction("create_student", |tx| insert_student_tx(tx, student))
        });

        match &result {
            Ok(created) => log_op_end!(
                "create_student",
                duration_ms = start.elapsed().as_millis() as u64,
                student_email = created.email.as_str(),
                row_count = created.courses.len() as u64
            ),
            Err(e) => log_op_error!(
                "create_student",
                *e,
                duration_ms = start.elapsed().as_millis() as u64,
                student_email = email.as_str()
            ),
        }
        result
    }

    /// All students in insertion order, each with its course projection
    ///
    /// # Errors
    /// `Query` on a store error.
    pub fn list_all(&self) -> Result<Vec<Student>> {
        log_op_start!("list_students");
        let start = Instant::now();

        let result = self.gateway.with_session("list_students", |conn| {
            let fail = |e| query_failure("list_students", "Error getting all students", e);
            let mut students = rows::select_all_students(conn).map_err(fail)?;
            let index = rows::select_enrollment_index(conn).map_err(fail)?;
            index.attach_to_students(&mut students);
            Ok(students)
        });

        match &result {
            Ok(students) => log_op_end!(
                "list_students",
                duration_ms = start.elapsed().as_millis() as u64,
                row_count = students.len() as u64
            ),
            Err(e) => log_op_error!(
                "list_students",
                *e,
                duration_ms = start.elapsed().as_millis() as u64
            ),
        }
        result
    }

    /// # Errors
    /// - `NotFound` if no student has this email
    /// - `Query` on a store error
    pub fn find_by_email(&self, email: &str) -> Result<Student> {
        log_op_start!("find_student_by_email", student_email = email);
        let start = Instant::now();

        let result = self
            .gateway
            .with_session("find_student_by_email", |conn| {
                load_student(conn, email, "find_student_by_email")
            });

        match &result {
            Ok(_) => log_op_end!(
                "find_student_by_email",
                duration_ms = start.elapsed().as_millis() as u64,
                student_email = email
            ),
            Err(e) => log_op_error!(
                "find_student_by_email",
                *e,
                duration_ms = start.elapsed().as_millis() as u64,
                student_email = email
            ),
        }
        result
    }

    /// True iff a student with exactly this email and password exists
    ///
    /// Plain, case-sensitive string comparison. An unknown email and a wrong
    /// password both yield `false`.
    ///
    /// # Errors
    /// `Query` on a store error.
    pub fn validate_credentials(&self, email: &str, password: &str) -> Result<bool> {
        log_op_start!("validate_credentials", student_email = email);
        let start = Instant::now();

        let result = self.gateway.with_session("validate_credentials", |conn| {
            rows::credentials_match(conn, email, password).map_err(|e| {
                query_failure("validate_credentials", "Error validating student", e)
            })
        });

        match &result {
            Ok(valid) => log_op_end!(
                "validate_credentials",
                duration_ms = start.elapsed().as_millis() as u64,
                valid = *valid
            ),
            Err(e) => log_op_error!(
                "validate_credentials",
                *e,
                duration_ms = start.elapsed().as_millis() as u64
            ),
        }
        result
    }

    /// Enroll a student in a course
    ///
    /// Looks up the student, then the course, then checks membership, all
    /// in one transaction. Registering an existing pair commits as a no-op
    /// and reports `AlreadyEnrolled`.
    ///
    /// # Errors
    /// - `NotFound` if the student or the course does not exist; nothing is
    ///   written
    /// - `Persistence` if the join row cannot be written or committed
    pub fn register_student_to_course(
        &self,
        email: &str,
        course_id: CourseId,
    ) -> Result<Registration> {
        log_op_start!(
            "register_student_to_course",
            student_email = email,
            course_id = course_id
        );
        let start = Instant::now();

        let result = self
            .gateway
            .with_transaction("register_student_to_course", |tx| {
                register_tx(tx, email, course_id)
            });

        match &result {
            Ok(outcome) => log_op_end!(
                "register_student_to_course",
                duration_ms = start.elapsed().as_millis() as u64,
                student_email = email,
                course_id = course_id,
                newly_enrolled = outcome.is_new()
            ),
            Err(e) => log_op_error!(
                "register_student_to_course",
                *e,
                duration_ms = start.elapsed().as_millis() as u64,
                student_email = email,
                course_id = course_id
            ),
        }
        result
    }

    /// Courses the student is enrolled in, via an explicit join
    ///
    /// Returns an empty list both when the student has no enrollments and
    /// when no student has this email.
    ///
    /// # Errors
    /// `Query` on a store error.
    pub fn enrolled_courses(&self, email: &str) -> Result<Vec<Course>> {
        log_op_start!("get_enrolled_courses", student_email = email);
        let start = Instant::now();

        let result = self.gateway.with_session("get_enrolled_courses", |conn| {
            let fail = |e| {
                query_failure(
                    "get_enrolled_courses",
                    "Error getting student courses with details",
                    e,
                )
            };
            let mut courses = rows::select_courses_joined_to(conn, email).map_err(fail)?;
            for course in &mut courses {
                course.students = rows::select_student_emails_of(conn, course.id).map_err(fail)?;
            }
            Ok(courses)
        });

        match &result {
            Ok(courses) => log_op_end!(
                "get_enrolled_courses",
                duration_ms = start.elapsed().as_millis() as u64,
                student_email = email,
                row_count = courses.len() as u64
            ),
            Err(e) => log_op_error!(
                "get_enrolled_courses",
                *e,
                duration_ms = start.elapsed().as_millis() as u64,
                student_email = email
            ),
        }
        result
    }
}

/// Load one student with its owning-side projection, or `NotFound`
pub(crate) fn load_student(conn: &Connection, email: &str, op: &str) -> Result<Student> {
    let fail = |e| query_failure(op, "Error getting student by email", e);

    let mut student = rows::select_student(conn, email)
        .map_err(fail)?
        .ok_or_else(|| RegistrarError::StudentNotFound {
            email: email.to_string(),
        })
        .map_err(|e| ExError::from(e).with_op(op))?;
    student.courses = rows::select_course_ids_of(conn, email).map_err(fail)?;
    Ok(student)
}

/// Insert a student row and its initial join rows on an open transaction
pub(crate) fn insert_student_tx(conn: &Connection, student: NewStudent) -> Result<Student> {
    let op = "create_student";
    let student = student.into_student();

    rows::insert_student(conn, &student)
        .map_err(|e| persistence_failure(op, "Error creating student", e))?;

    for &course_id in &student.courses {
        load_course(conn, course_id, op)?;
        rows::insert_enrollment(conn, &student.email, course_id)
            .map_err(|e| persistence_failure(op, "Error creating student", e))?;
    }

    Ok(student)
}

fn register_tx(conn: &Connection, email: &str, course_id: CourseId) -> Result<Registration> {
    let op = "register_student_to_course";

    let student = load_student(conn, email, op)?;
    let course = load_course(conn, course_id, op)?;

    if student.is_enrolled_in(course.id) {
        tracing::debug!(student_email = email, course_id, "already enrolled");
        return Ok(Registration::AlreadyEnrolled);
    }

    // UNIQUE(student_email, course_id) backs up the membership check
    let inserted = rows::insert_enrollment(conn, &student.email, course.id)
        .map_err(|e| persistence_failure(op, "Error registering student to course", e))?;

    Ok(if inserted {
        Registration::Enrolled
    } else {
        Registration::AlreadyEnrolled
    })
}
