//! Cache configuration space explorer (`cachespace`)
//!
//! Enumerates every cache geometry that fits a fixed capacity and
//! drives an external cache simulator over all of them.

// Modules
pub mod config;
pub mod config_space;
pub mod report;
pub mod results;
pub mod simulator;
pub mod sweep;

// Exports
pub use self::{
	config::SweepConfig,
	config_space::{BitRange, CacheConfig, ConfigSpace},
	report::Report,
	results::{ResultRow, SimSummary},
	simulator::{ExternalSimulator, RunError, Simulator, TraceRef},
	sweep::{FailurePolicy, RunFailure, RunRecord, Sweep, SweepSummary},
};
