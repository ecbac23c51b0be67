//! Course registration CLI
//!
//! Command-line interface over the course registration store

use clap::{Parser, Subcommand};
use coursereg_core::logging_facility;
use coursereg_store::{Gateway, StoreConfig};
use std::path::PathBuf;

mod commands;

use commands::Output;

#[derive(Debug, Parser)]
#[command(name = "coursereg")]
#[command(about = "Course registration - students, courses and enrollments", long_about = None)]
struct Cli {
    /// Config file; defaults to ./coursereg.toml when present
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create the store and apply migrations
    Init,
    /// Seed import operations
    Seed(commands::seed::SeedArgs),
    /// Course operations
    Course(commands::course::CourseArgs),
    /// Student operations
    Student(commands::student::StudentArgs),
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> commands::CommandResult {
    let config = StoreConfig::load(cli.config.as_deref())?;
    logging_facility::init(config.logging.profile()?);

    let gateway = Gateway::open(&config.database)?;
    let out = Output::new(cli.json);

    let result = match cli.command {
        Commands::Init => commands::init::execute(&gateway, &out),
        Commands::Seed(args) => commands::seed::execute(args, &gateway, &out),
        Commands::Course(args) => commands::course::execute(args, &gateway, &out),
        Commands::Student(args) => commands::student::execute(args, &gateway, &out),
    };

    gateway.close()?;
    result
}
