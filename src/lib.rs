//! Payroll engine.
//!
//! This crate calculates period payroll for employees, submits processed
//! payroll runs to a disbursement system in scheduled batches, and derives
//! payslips and year-to-date summaries from the stored runs.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod payroll;
pub mod payslip;
pub mod store;
pub mod submission;
