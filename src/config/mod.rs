//! Configuration loading and management for the payroll engine.
//!
//! This module loads the overtime policy, monetary rounding and report
//! delivery settings from a YAML file.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/payroll.yaml").unwrap();
//! println!("Manager report goes to {}", config.reports().manager_email);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    MAX_MONEY_SCALE, MoneyConfig, OvertimePeriod, OvertimePolicy, PayrollConfig, ReportConfig,
};
