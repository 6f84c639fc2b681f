//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine's
//! seed configuration from YAML files.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{EngineError, EngineResult};
use crate::models::Member;
use crate::store::{MemoryStore, StoreResult};

use super::types::MembersConfig;

/// Loads and provides access to the engine's seed configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/hr/
/// └── members.yaml    # Seed member directory
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/hr").unwrap();
/// for member in loader.members() {
///     println!("{}: {}", member.id, member.base_salary);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    members: Vec<Member>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/hr")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `members.yaml` is missing (`ConfigNotFound`)
    /// - the file contains invalid YAML or is missing required fields
    ///   (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let members_path = path.join("members.yaml");
        let members_config = Self::load_yaml::<MembersConfig>(&members_path)?;

        Ok(Self {
            members: members_config.members,
        })
    }

    /// Returns the seed member directory.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Inserts every configured member into a memory store.
    pub fn seed(&self, store: &MemoryStore) -> StoreResult<()> {
        for member in &self.members {
            store.insert_member(member.clone())?;
        }
        Ok(())
    }

    fn load_yaml<T: DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let contents = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path.display().to_string(),
        })?;
        serde_yaml::from_str(&contents).map_err(|err| EngineError::ConfigParseError {
            path: path.display().to_string(),
            message: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemberStore;

    #[test]
    fn test_load_missing_directory_is_config_not_found() {
        let result = ConfigLoader::load("/definitely/missing");
        assert!(matches!(result, Err(EngineError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_load_shipped_config() {
        let loader = ConfigLoader::load("./config/hr").unwrap();
        assert!(!loader.members().is_empty());
        assert!(loader.members().iter().any(|m| m.is_active()));
    }

    #[test]
    fn test_seed_populates_member_directory() {
        let loader = ConfigLoader::load("./config/hr").unwrap();
        let store = MemoryStore::new();
        loader.seed(&store).unwrap();

        let active = store.list_active_members().unwrap();
        let configured_active = loader.members().iter().filter(|m| m.is_active()).count();
        assert_eq!(active.len(), configured_active);
    }
}
