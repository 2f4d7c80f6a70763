//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! settings and directory fixtures from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{PayrollError, PayrollResult};
use crate::models::{Employee, PayGroup};

use super::types::{AppSettings, DirectoryConfig};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── settings.yaml   # Server, scheduler, disbursement and payslip settings
/// └── directory.yaml  # Employees and pay groups
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Listening on {}", loader.settings().server.bind_addr);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    settings: AppSettings,
    directory: DirectoryConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::ConfigNotFound`] if either file is missing and
    /// [`PayrollError::ConfigParseError`] if either contains invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> PayrollResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<AppSettings>(&path.join("settings.yaml"))?;
        let directory = Self::load_yaml::<DirectoryConfig>(&path.join("directory.yaml"))?;

        Ok(Self {
            settings,
            directory,
        })
    }

    /// Builds a loader from already constructed parts.
    pub fn from_parts(settings: AppSettings, directory: DirectoryConfig) -> Self {
        Self {
            settings,
            directory,
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> PayrollResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PayrollError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| PayrollError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    /// Returns the configured employees.
    pub fn employees(&self) -> &[Employee] {
        &self.directory.employees
    }

    /// Returns the configured pay groups.
    pub fn pay_groups(&self) -> &[PayGroup] {
        &self.directory.pay_groups
    }
}
