//! Store initialization
//!
//! Usage: coursereg init
//!
//! Opening the gateway already applied pending migrations; this reports
//! where the store lives.

use super::{CommandResult, Output};
use coursereg_store::Gateway;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct InitReport {
    path: String,
}

pub fn execute(gateway: &Gateway, out: &Output) -> CommandResult {
    let report = InitReport {
        path: gateway.path().display().to_string(),
    };
    out.emit(&report, |r| println!("✓ Store ready at {}", r.path))
}
