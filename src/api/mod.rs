//! HTTP API module for the payroll engine.
//!
//! This module provides the REST endpoints for attendance check-in/out,
//! leave submission and decisions, and the monthly payroll run.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CheckRequest, GeneratePayrollRequest, LeaveDecisionRequest, LeaveSubmitRequest};
pub use response::{ApiError, LeaveDecisionResponse};
pub use state::AppState;
