//! Seed import command
//!
//! Usage: coursereg seed import <PATH>

use super::{CommandResult, Output};
use clap::{Args, Subcommand};
use coursereg_store::seed::{import_seed, ImportSummary};
use coursereg_store::Gateway;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct SeedArgs {
    #[command(subcommand)]
    pub command: SeedCommand,
}

#[derive(Debug, Subcommand)]
pub enum SeedCommand {
    /// Import a seed file (or a directory of seed files) into the store
    Import(ImportArgs),
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Path to seed YAML file or directory
    pub path: PathBuf,
}

pub fn execute(args: SeedArgs, gateway: &Gateway, out: &Output) -> CommandResult {
    match args.command {
        SeedCommand::Import(import_args) => execute_import(import_args, gateway, out),
    }
}

fn execute_import(args: ImportArgs, gateway: &Gateway, out: &Output) -> CommandResult {
    let files = seed_files(&args.path)?;

    let mut total = ImportSummary::default();
    for seed_file in files {
        let summary = import_seed(&seed_file, gateway)?;
        total.courses += summary.courses;
        total.students += summary.students;
        total.enrollments += summary.enrollments;

        out.emit(&summary, |s| {
            println!(
                "✓ Imported {} (courses: {}, students: {}, enrollments: {})",
                seed_file.display(),
                s.courses,
                s.students,
                s.enrollments
            )
        })?;
    }

    tracing::debug!(
        courses = total.courses,
        students = total.students,
        enrollments = total.enrollments,
        "seed import finished"
    );
    Ok(())
}

/// A single file, or the yaml files of a directory in name order
fn seed_files(path: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files: Vec<PathBuf> = std::fs::read_dir(path)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.extension()
                .map(|ext| ext == "yaml" || ext == "yml")
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    Ok(files)
}
