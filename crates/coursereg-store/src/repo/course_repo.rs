//! Course repository
//!
//! Every public operation opens its own unit of work on the injected
//! gateway and owns the start/end logging for that operation.

use crate::errors::{persistence_failure, query_failure, Result};
use crate::gateway::Gateway;
use crate::repo::rows;
use coursereg_core::errors::{ExError, RegistrarError};
use coursereg_core::model::{Course, CourseId, NewCourse, Student};
use coursereg_core::rules::validate_new_course;
use coursereg_core::{log_op_end, log_op_error, log_op_start};
use rusqlite::Connection;
use std::time::Instant;

pub struct CourseRepository<'g> {
    gateway: &'g Gateway,
}

impl<'g> CourseRepository<'g> {
    pub fn new(gateway: &'g Gateway) -> Self {
        Self { gateway }
    }

    /// Persist a new course; the store assigns its id
    ///
    /// # Errors
    /// - `InvalidInput` if name or instructor are blank
    /// - `Persistence` if the insert cannot commit (rolled back first)
    pub fn create(&self, course: NewCourse) -> Result<Course> {
        log_op_start!("create_course", course_name = course.name.as_str());
        let start = Instant::now();

        let result = validate_new_course(&course).and_then(|()| {
            self.gateway.with_transaction("create_course", |tx| {
                let id = rows::insert_course(tx, &course.name, &course.instructor)
                    .map_err(|e| persistence_failure("create_course", "Error creating course", e))?;
                Ok(course.into_course(id))
            })
        });

        match &result {
            Ok(created) => log_op_end!(
                "create_course",
                duration_ms = start.elapsed().as_millis() as u64,
                course_id = created.id
            ),
            Err(e) => log_op_error!(
                "create_course",
                *e,
                duration_ms = start.elapsed().as_millis() as u64
            ),
        }
        result
    }

    /// All courses in id order, each with its enrolled-student projection
    ///
    /// # Errors
    /// `Query` on a store error.
    pub fn list_all(&self) -> Result<Vec<Course>> {
        log_op_start!("list_courses");
        let start = Instant::now();

        let result = self.gateway.with_session("list_courses", |conn| {
            let fail = |e| query_failure("list_courses", "Error getting all courses", e);
            let mut courses = rows::select_all_courses(conn).map_err(fail)?;
            let index = rows::select_enrollment_index(conn).map_err(fail)?;
            index.attach_to_courses(&mut courses);
            Ok(courses)
        });

        match &result {
            Ok(courses) => log_op_end!(
                "list_courses",
                duration_ms = start.elapsed().as_millis() as u64,
                row_count = courses.len() as u64
            ),
            Err(e) => log_op_error!(
                "list_courses",
                *e,
                duration_ms = start.elapsed().as_millis() as u64
            ),
        }
        result
    }

    /// The course with this id, including the students enrolled in it
    ///
    /// # Errors
    /// - `NotFound` if no course has this id
    /// - `Query` on a store error
    pub fn find_by_id(&self, course_id: CourseId) -> Result<Course> {
        log_op_start!("find_course_by_id", course_id = course_id);
        let start = Instant::now();

        let result = self
            .gateway
            .with_session("find_course_by_id", |conn| load_course(conn, course_id, "find_course_by_id"));

        match &result {
            Ok(_) => log_op_end!(
                "find_course_by_id",
                duration_ms = start.elapsed().as_millis() as u64,
                course_id = course_id
            ),
            Err(e) => log_op_error!(
                "find_course_by_id",
                *e,
                duration_ms = start.elapsed().as_millis() as u64,
                course_id = course_id
            ),
        }
        result
    }

    /// Students enrolled in a course, as full rows
    ///
    /// # Errors
    /// - `NotFound` if the course does not exist
    /// - `Query` on a store error
    pub fn enrolled_students(&self, course_id: CourseId) -> Result<Vec<Student>> {
        log_op_start!("list_course_students", course_id = course_id);
        let start = Instant::now();

        let result = self.gateway.with_session("list_course_students", |conn| {
            let op = "list_course_students";
            let fail = |e| query_failure(op, "Error getting course students", e);

            rows::select_course(conn, course_id)
                .map_err(fail)?
                .ok_or(RegistrarError::CourseNotFound { course_id })
                .map_err(|e| ExError::from(e).with_op(op))?;

            let mut students = rows::select_students_joined_to(conn, course_id).map_err(fail)?;
            for student in &mut students {
                student.courses = rows::select_course_ids_of(conn, &student.email).map_err(fail)?;
            }
            Ok(students)
        });

        match &result {
            Ok(students) => log_op_end!(
                "list_course_students",
                duration_ms = start.elapsed().as_millis() as u64,
                row_count = students.len() as u64
            ),
            Err(e) => log_op_error!(
                "list_course_students",
                *e,
                duration_ms = start.elapsed().as_millis() as u64,
                course_id = course_id
            ),
        }
        result
    }
}

/// Load one course with its inverse projection, or `NotFound`
pub(crate) fn load_course(conn: &Connection, course_id: CourseId, op: &str) -> Result<Course> {
    let fail = |e| query_failure(op, "Error finding course by id", e);

    let mut course = rows::select_course(conn, course_id)
        .map_err(fail)?
        .ok_or(RegistrarError::CourseNotFound { course_id })
        .map_err(|e| ExError::from(e).with_op(op))?;
    course.students = rows::select_student_emails_of(conn, course_id).map_err(fail)?;
    Ok(course)
}
