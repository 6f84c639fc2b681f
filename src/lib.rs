//! Attendance-driven payroll engine.
//!
//! This crate provides the derived-computation core of an HR system: reconciling
//! approved leave requests into per-day attendance records, and generating monthly
//! payroll records by walking every working day of a target month and converting
//! absences into salary deductions.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod store;
