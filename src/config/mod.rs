//! Configuration for the payroll engine.
//!
//! The engine itself is configured in code (weekend days and the daily-rate
//! divisor are fixed business rules); what loads from disk is the seed data
//! the API server starts with.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::MembersConfig;
