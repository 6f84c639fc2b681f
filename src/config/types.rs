//! Configuration types for the payroll engine.
//!
//! This module contains the strongly-typed structures deserialized from the
//! YAML configuration files that seed the engine at startup.

use serde::Deserialize;

use crate::models::Member;

/// The `members.yaml` file structure: the seed member directory.
#[derive(Debug, Clone, Deserialize)]
pub struct MembersConfig {
    /// The members to seed the directory with.
    pub members: Vec<Member>,
}
