//! Course commands
//!
//! Usage:
//!   coursereg course create --name <NAME> --instructor <INSTRUCTOR>
//!   coursereg course list
//!   coursereg course show <ID>
//!   coursereg course students <ID>

use super::{CommandResult, Output};
use clap::{Args, Subcommand};
use coursereg_core::{Course, CourseId, NewCourse};
use coursereg_store::{CourseRepository, Gateway};

#[derive(Debug, Args)]
pub struct CourseArgs {
    #[command(subcommand)]
    pub command: CourseCommand,
}

#[derive(Debug, Subcommand)]
pub enum CourseCommand {
    /// Create a course; the store assigns its id
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        instructor: String,
    },
    /// List all courses
    List,
    /// Show one course with its enrolled students
    Show { id: CourseId },
    /// List the students enrolled in a course
    Students { id: CourseId },
}

pub fn execute(args: CourseArgs, gateway: &Gateway, out: &Output) -> CommandResult {
    let repo = CourseRepository::new(gateway);

    match args.command {
        CourseCommand::Create { name, instructor } => {
            let course = repo.create(NewCourse::new(name, instructor))?;
            out.emit(&course, |c| println!("✓ Created {}", c))
        }
        CourseCommand::List => {
            let courses = repo.list_all()?;
            out.emit(courses.as_slice(), |cs| {
                for c in cs {
                    print_row(c);
                }
            })
        }
        CourseCommand::Show { id } => {
            let course = repo.find_by_id(id)?;
            out.emit(&course, |c| {
                println!("{}", c);
                for email in &c.students {
                    println!("  - {}", email);
                }
            })
        }
        CourseCommand::Students { id } => {
            let students = repo.enrolled_students(id)?;
            out.emit(students.as_slice(), |ss| {
                for s in ss {
                    println!("{}\t{}", s.email, s.name);
                }
            })
        }
    }
}

fn print_row(course: &Course) {
    println!(
        "{}\t{}\t{}\t{} enrolled",
        course.id,
        course.name,
        course.instructor,
        course.students.len()
    );
}
