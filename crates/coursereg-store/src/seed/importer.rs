//! Seed importer
//!
//! Writes a validated seed through the gateway in one transaction: courses
//! first (ids assigned in file order), then students with their join rows.
//! Any failure rolls the whole import back.

use crate::errors::{persistence_failure, Result};
use crate::gateway::Gateway;
use crate::repo::rows;
use crate::repo::student_repo::insert_student_tx;
use crate::seed::format_v0::SeedV0;
use crate::seed::parser::{parse_seed_file, parse_seed_str};
use coursereg_core::model::{CourseId, NewStudent};
use coursereg_core::{log_op_end, log_op_error, log_op_start};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

/// Counts of rows written by an import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub courses: usize,
    pub students: usize,
    pub enrollments: usize,
}

/// Parse, validate, and import a seed file
pub fn import_seed(path: &Path, gateway: &Gateway) -> Result<ImportSummary> {
    let seed = parse_seed_file(path)?;
    import(&seed, gateway)
}

/// Parse, validate, and import seed YAML text
pub fn import_seed_str(content: &str, gateway: &Gateway) -> Result<ImportSummary> {
    let seed = parse_seed_str(content)?;
    import(&seed, gateway)
}

fn import(seed: &SeedV0, gateway: &Gateway) -> Result<ImportSummary> {
    log_op_start!("seed_import", row_count = (seed.courses.len() + seed.students.len()) as u64);
    let start = Instant::now();

    let result = gateway.with_transaction("seed_import", |tx| {
        let mut summary = ImportSummary::default();
        let mut ids: HashMap<&str, CourseId> = HashMap::new();

        for course in &seed.courses {
            let id = rows::insert_course(tx, &course.name, &course.instructor)
                .map_err(|e| persistence_failure("seed_import", "Error creating course", e))?;
            ids.insert(course.key.as_str(), id);
            summary.courses += 1;
        }

        for student in &seed.students {
            // parser guarantees every key resolves
            let course_ids = student.courses.iter().filter_map(|k| ids.get(k.as_str()).copied());
            let new = NewStudent::new(&student.email, &student.name, student.password.as_str())
                .with_courses(course_ids);

            let created = insert_student_tx(tx, new)?;
            summary.students += 1;
            summary.enrollments += created.courses.len();
        }

        Ok(summary)
    });

    match &result {
        Ok(summary) => log_op_end!(
            "seed_import",
            duration_ms = start.elapsed().as_millis() as u64,
            row_count = (summary.courses + summary.students + summary.enrollments) as u64
        ),
        Err(e) => log_op_error!(
            "seed_import",
            *e,
            duration_ms = start.elapsed().as_millis() as u64
        ),
    }
    result
}
