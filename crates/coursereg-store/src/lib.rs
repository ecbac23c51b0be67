//! Course registration store
//!
//! Provides:
//! - SQLite connection management and configuration
//! - Embedded schema migrations with checksums
//! - The persistence gateway (scoped units of work)
//! - Course and student repositories
//! - Seed data import

pub mod config;
pub mod db;
pub mod errors;
pub mod gateway;
pub mod migrations;
pub mod repo;
pub mod seed;

// Re-export key types
pub use config::StoreConfig;
pub use errors::Result;
pub use gateway::Gateway;
pub use repo::{CourseRepository, StudentRepository};
