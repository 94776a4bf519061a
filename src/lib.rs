//! Payroll, attendance and consumption report engine
//!
//! This crate turns raw attendance, consumption and schedule records into
//! per-employee reports with hours worked and pay owed, and aggregates those
//! reports into an organization-wide manager report.
//!
//! - [`calculation`] holds the pure calculators.
//! - [`service`] wires them to record sources and outbound report ports.
//! - [`api`] exposes the service over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
