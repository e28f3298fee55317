//! Configure and submit a forest canopy disturbance ensemble run to an
//! external scientific-workflow platform.
//!
//! The crate builds a validated run configuration from user parameters, a
//! static soil moisture dataset, and fixed site/model constants, registers
//! a workflow record through the [`platform::Platform`] port, and hands the
//! merged configuration over for asynchronous execution. Scheduling,
//! queuing, and storage are all the platform's responsibility.

pub mod errors;
pub mod params;
pub mod pft;
pub mod platform;
pub mod settings;
pub mod soil;
pub mod workflow;

pub use errors::{RunError, RunResult};
pub use params::{RunParameters, Taxonomy};
pub use platform::{Platform, WorkflowRecord, WorkflowRequest};
pub use workflow::{submit_run, submit_run_with_dataset, SubmittedRun};
