//! Migration framework
//!
//! - Embedded SQL migrations, applied in order
//! - Checksums recorded per migration and verified on every open
//! - Idempotent application

mod checksums;
mod embedded;
mod runner;

pub use embedded::{get_migrations, Migration};
pub use runner::apply_migrations;
