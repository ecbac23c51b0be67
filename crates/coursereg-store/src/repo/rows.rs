//! Row-level SQL shared by both repositories
//!
//! These take a plain `&Connection` so they run unchanged inside a
//! transaction (`Transaction` derefs to `Connection`). Callers map the
//! returned `rusqlite::Error` into the taxonomy for their operation.

use coursereg_core::model::{Course, CourseId, Enrollment, EnrollmentIndex, Student};
use coursereg_core_types::Sensitive;
use rusqlite::{Connection, OptionalExtension, Row};
use std::collections::BTreeSet;

type SqlResult<T> = std::result::Result<T, rusqlite::Error>;

fn course_from_row(row: &Row<'_>) -> SqlResult<Course> {
    Ok(Course::new(row.get(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?))
}

fn student_from_row(row: &Row<'_>) -> SqlResult<Student> {
    let email: String = row.get(0)?;
    let name: String = row.get(1)?;
    let password: String = row.get(2)?;
    Ok(Student::new(email, name, Sensitive::new(password)))
}

pub(crate) fn insert_course(conn: &Connection, name: &str, instructor: &str) -> SqlResult<CourseId> {
    conn.execute(
        "INSERT INTO course (name, instructor) VALUES (?1, ?2)",
        rusqlite::params![name, instructor],
    )?;
    Ok(conn.last_insert_rowid())
}

pub(crate) fn insert_student(conn: &Connection, student: &Student) -> SqlResult<()> {
    conn.execute(
        "INSERT INTO student (email, name, password) VALUES (?1, ?2, ?3)",
        rusqlite::params![student.email, student.name, student.password.expose()],
    )?;
    Ok(())
}

/// Insert a join row; returns false if the pair already existed
pub(crate) fn insert_enrollment(conn: &Connection, email: &str, course_id: CourseId) -> SqlResult<bool> {
    let changed = conn.execute(
        "INSERT OR IGNORE INTO student_course (student_email, course_id) VALUES (?1, ?2)",
        rusqlite::params![email, course_id],
    )?;
    Ok(changed == 1)
}

pub(crate) fn select_course(conn: &Connection, course_id: CourseId) -> SqlResult<Option<Course>> {
    conn.query_row(
        "SELECT id, name, instructor FROM course WHERE id = ?1",
        [course_id],
        course_from_row,
    )
    .optional()
}

pub(crate) fn select_student(conn: &Connection, email: &str) -> SqlResult<Option<Student>> {
    conn.query_row(
        "SELECT email, name, password FROM student WHERE email = ?1",
        [email],
        student_from_row,
    )
    .optional()
}

pub(crate) fn select_all_courses(conn: &Connection) -> SqlResult<Vec<Course>> {
    let mut stmt = conn.prepare("SELECT id, name, instructor FROM course ORDER BY id")?;
    let rows = stmt.query_map([], course_from_row)?;
    rows.collect()
}

pub(crate) fn select_all_students(conn: &Connection) -> SqlResult<Vec<Student>> {
    let mut stmt = conn.prepare("SELECT email, name, password FROM student ORDER BY rowid")?;
    let rows = stmt.query_map([], student_from_row)?;
    rows.collect()
}

pub(crate) fn select_enrollment_index(conn: &Connection) -> SqlResult<EnrollmentIndex> {
    let mut stmt = conn.prepare("SELECT student_email, course_id FROM student_course")?;
    let rows = stmt.query_map([], |row| Ok(Enrollment::new(row.get::<_, String>(0)?, row.get(1)?)))?;
    rows.collect()
}

/// Owning-side projection for one student
pub(crate) fn select_course_ids_of(conn: &Connection, email: &str) -> SqlResult<BTreeSet<CourseId>> {
    let mut stmt =
        conn.prepare("SELECT course_id FROM student_course WHERE student_email = ?1")?;
    let rows = stmt.query_map([email], |row| row.get(0))?;
    rows.collect()
}

/// Inverse-side projection for one course
pub(crate) fn select_student_emails_of(
    conn: &Connection,
    course_id: CourseId,
) -> SqlResult<BTreeSet<String>> {
    let mut stmt =
        conn.prepare("SELECT student_email FROM student_course WHERE course_id = ?1")?;
    let rows = stmt.query_map([course_id], |row| row.get(0))?;
    rows.collect()
}

/// Courses joined to a student email through the relation
pub(crate) fn select_courses_joined_to(conn: &Connection, email: &str) -> SqlResult<Vec<Course>> {
    let mut stmt = conn.prepare(
        "SELECT c.id, c.name, c.instructor FROM course c
         INNER JOIN student_course sc ON c.id = sc.course_id
         INNER JOIN student s ON s.email = sc.student_email
         WHERE s.email = ?1
         ORDER BY c.id",
    )?;
    let rows = stmt.query_map([email], course_from_row)?;
    rows.collect()
}

/// Students joined to a course id through the relation
pub(crate) fn select_students_joined_to(conn: &Connection, course_id: CourseId) -> SqlResult<Vec<Student>> {
    let mut stmt = conn.prepare(
        "SELECT s.email, s.name, s.password FROM student s
         INNER JOIN student_course sc ON s.email = sc.student_email
         WHERE sc.course_id = ?1
         ORDER BY s.email",
    )?;
    let rows = stmt.query_map([course_id], student_from_row)?;
    rows.collect()
}

pub(crate) fn credentials_match(conn: &Connection, email: &str, password: &str) -> SqlResult<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM student WHERE email = ?1 AND password = ?2",
        [email, password],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}
