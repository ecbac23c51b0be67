//! Seed format v0 schema
//!
//! ```yaml
//! schema_version: 0
//! courses:
//!   - key: java
//!     name: Java
//!     instructor: Phillip Witkin
//! students:
//!   - email: reema@gmail.com
//!     name: reema brown
//!     password: password
//!     courses: [java]
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedV0 {
    /// Must be 0
    pub schema_version: u32,

    #[serde(default)]
    pub courses: Vec<SeedCourse>,

    #[serde(default)]
    pub students: Vec<SeedStudent>,
}

/// Course definition; `key` is local to the seed file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedCourse {
    pub key: String,
    pub name: String,
    pub instructor: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedStudent {
    pub email: String,
    pub name: String,
    pub password: String,

    /// Course keys from the same file
    #[serde(default)]
    pub courses: Vec<String>,
}
