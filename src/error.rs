//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur outside the store seam (store
//! failures have their own [`StoreError`](crate::store::StoreError) type).

use thiserror::Error;

use crate::models::LeaveStatus;

/// The main error type for the payroll engine.
///
/// Engine batch operations never return this type: per-date and per-member
/// failures are logged and counted instead of aborting the batch. `EngineError`
/// surfaces only at the configuration and API boundaries.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/members.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/members.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A member id was not found in the member directory.
    #[error("Member not found: {id}")]
    MemberNotFound {
        /// The member id that was not found.
        id: String,
    },

    /// A month key could not be parsed as `YYYY-MM`.
    #[error("Invalid month key '{input}': expected YYYY-MM with month 01-12")]
    InvalidMonth {
        /// The input that failed to parse.
        input: String,
    },

    /// A leave request id was not found in the leave store.
    #[error("Leave request not found: {id}")]
    LeaveNotFound {
        /// The leave request id that was not found.
        id: u64,
    },

    /// A leave request was already approved or rejected.
    #[error("Leave request {id} is already {status}")]
    LeaveAlreadyDecided {
        /// The leave request id.
        id: u64,
        /// The status the request already holds.
        status: LeaveStatus,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
