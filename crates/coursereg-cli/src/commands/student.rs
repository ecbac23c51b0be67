//! Student commands
//!
//! Usage:
//!   coursereg student create --email <EMAIL> --name <NAME> --password <PW> [--course <ID>]...
//!   coursereg student list
//!   coursereg student show <EMAIL>
//!   coursereg student login <EMAIL> <PASSWORD>
//!   coursereg student register <EMAIL> <COURSE_ID>
//!   coursereg student courses <EMAIL>

use super::{CommandResult, Output};
use clap::{Args, Subcommand};
use coursereg_core::{CourseId, NewStudent, Registration};
use coursereg_store::{Gateway, StudentRepository};
use serde::Serialize;

#[derive(Debug, Args)]
pub struct StudentArgs {
    #[command(subcommand)]
    pub command: StudentCommand,
}

#[derive(Debug, Subcommand)]
pub enum StudentCommand {
    /// Create a student, optionally enrolled in existing courses
    Create {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        password: String,
        /// Initial course id (repeatable)
        #[arg(long = "course")]
        courses: Vec<CourseId>,
    },
    /// List all students
    List,
    /// Show one student and the ids of their courses
    Show { email: String },
    /// Check an email/password pair
    Login { email: String, password: String },
    /// Enroll a student in a course
    Register { email: String, course_id: CourseId },
    /// List the courses a student is enrolled in
    Courses { email: String },
}

#[derive(Debug, Serialize)]
struct LoginReport<'a> {
    email: &'a str,
    valid: bool,
}

#[derive(Debug, Serialize)]
struct RegisterReport<'a> {
    email: &'a str,
    course_id: CourseId,
    outcome: Registration,
}

pub fn execute(args: StudentArgs, gateway: &Gateway, out: &Output) -> CommandResult {
    let repo = StudentRepository::new(gateway);

    match args.command {
        StudentCommand::Create {
            email,
            name,
            password,
            courses,
        } => {
            let student = repo.create(NewStudent::new(email, name, password).with_courses(courses))?;
            out.emit(&student, |s| println!("✓ Created {}", s))
        }
        StudentCommand::List => {
            let students = repo.list_all()?;
            out.emit(students.as_slice(), |ss| {
                for s in ss {
                    println!("{}\t{}\t{} course(s)", s.email, s.name, s.courses.len());
                }
            })
        }
        StudentCommand::Show { email } => {
            let student = repo.find_by_email(&email)?;
            out.emit(&student, |s| {
                println!("{}", s);
                for id in &s.courses {
                    println!("  - course {}", id);
                }
            })
        }
        StudentCommand::Login { email, password } => {
            let valid = repo.validate_credentials(&email, &password)?;
            let report = LoginReport { email: &email, valid };
            out.emit(&report, |r| {
                if r.valid {
                    println!("✓ Credentials valid for {}", r.email);
                } else {
                    println!("✗ Invalid credentials for {}", r.email);
                }
            })
        }
        StudentCommand::Register { email, course_id } => {
            let outcome = repo.register_student_to_course(&email, course_id)?;
            let report = RegisterReport {
                email: &email,
                course_id,
                outcome,
            };
            out.emit(&report, |r| match r.outcome {
                Registration::Enrolled => {
                    println!("✓ Registered {} to course {}", r.email, r.course_id)
                }
                Registration::AlreadyEnrolled => {
                    println!("{} is already registered to course {}", r.email, r.course_id)
                }
            })
        }
        StudentCommand::Courses { email } => {
            let courses = repo.enrolled_courses(&email)?;
            out.emit(courses.as_slice(), |cs| {
                if cs.is_empty() {
                    println!("No courses for {}", email);
                }
                for c in cs {
                    println!("{}\t{}\t{}", c.id, c.name, c.instructor);
                }
            })
        }
    }
}
