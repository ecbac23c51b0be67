//! Seed data import
//!
//! - Seed format v0 (YAML): courses with local keys, students referencing them
//! - Parser with validation
//! - Transactional importer

pub mod format_v0;
pub mod importer;
pub mod parser;

pub use format_v0::{SeedCourse, SeedStudent, SeedV0};
pub use importer::{import_seed, import_seed_str, ImportSummary};
pub use parser::{parse_seed_file, parse_seed_str};
