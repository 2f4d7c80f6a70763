//! Configuration loading and management for the payroll engine.
//!
//! This module loads engine settings (server, scheduler, disbursement,
//! simulator, payslip storage) and the employee/pay group fixtures from YAML
//! files.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Chunk size: {}", config.settings().scheduler.chunk_size);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AppSettings, DirectoryConfig, DisbursementMode, DisbursementSettings, PayslipSettings,
    SchedulerSettings, ServerSettings, SimulatorSettings,
};
