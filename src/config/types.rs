//! Configuration types for the payroll engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Every section has
//! defaults, so an empty `settings.yaml` is valid.

use std::time::Duration;

use serde::Deserialize;

use crate::models::{Employee, PayGroup};
use crate::submission::SubmissionPolicy;

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Address the API listens on.
    pub bind_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Batch submission scheduler settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SchedulerSettings {
    /// Whether the periodic loop is started at all.
    pub enabled: bool,
    /// Seconds between ticks.
    pub interval_secs: u64,
    /// Maximum runs submitted per tick.
    pub chunk_size: usize,
    /// Upper bound on a single disbursement call.
    pub disbursement_timeout_ms: u64,
    /// Resubmission policy.
    pub policy: SubmissionPolicy,
}

impl SchedulerSettings {
    /// Tick interval as a [`Duration`].
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }

    /// Disbursement timeout as a [`Duration`].
    pub fn disbursement_timeout(&self) -> Duration {
        Duration::from_millis(self.disbursement_timeout_ms)
    }
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 60,
            chunk_size: 100,
            disbursement_timeout_ms: 10_000,
            policy: SubmissionPolicy::default(),
        }
    }
}

/// Where the scheduler sends batches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisbursementMode {
    /// Call the in-process integration service.
    #[default]
    Local,
    /// POST to a remote integration endpoint.
    Http,
}

/// Disbursement collaborator settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DisbursementSettings {
    /// Local or remote collaborator.
    pub mode: DisbursementMode,
    /// Base URL of the remote collaborator, required for `http` mode.
    pub base_url: Option<String>,
}

/// Outcome split of the settlement simulator, in whole percent.
///
/// Whatever remains after success and retry is reported as FAILED.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct SimulatorSettings {
    /// Percentage of SUCCESS outcomes.
    pub success_percent: u8,
    /// Percentage of RETRY outcomes.
    pub retry_percent: u8,
}

impl Default for SimulatorSettings {
    fn default() -> Self {
        Self {
            success_percent: 80,
            retry_percent: 10,
        }
    }
}

/// Payslip document settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PayslipSettings {
    /// Root directory under which payslip documents are addressed.
    pub storage_root: String,
}

impl Default for PayslipSettings {
    fn default() -> Self {
        Self {
            storage_root: "payslips".to_string(),
        }
    }
}

/// Contents of `settings.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// HTTP server.
    pub server: ServerSettings,
    /// Batch scheduler.
    pub scheduler: SchedulerSettings,
    /// Disbursement collaborator.
    pub disbursement: DisbursementSettings,
    /// Settlement simulator.
    pub simulator: SimulatorSettings,
    /// Payslip documents.
    pub payslip: PayslipSettings,
}

/// Contents of `directory.yaml`: master data owned by other services,
/// loaded as fixtures.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Employees.
    pub employees: Vec<Employee>,
    /// Pay groups.
    pub pay_groups: Vec<PayGroup>,
}
