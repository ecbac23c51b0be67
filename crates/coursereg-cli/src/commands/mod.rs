//! Subcommand implementations

pub mod course;
pub mod init;
pub mod seed;
pub mod student;

use serde::Serialize;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Chooses between human-readable lines and JSON on stdout
#[derive(Debug, Clone, Copy)]
pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Print `value` as JSON, or run `human` to print it as text
    pub fn emit<T, F>(&self, value: &T, human: F) -> CommandResult
    where
        T: Serialize + ?Sized,
        F: FnOnce(&T),
    {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            human(value);
        }
        Ok(())
    }
}
