//! Fan-out/fan-in orchestrator for the random-mean service
//!
//! Launches one worker task per requested sample against a randomness
//! source, collects their outcomes through a success channel and a failure
//! channel, cancels every sibling on the first failure and assembles the
//! per-worker and combined statistics once all workers have reported.

pub mod core;
pub mod error;
pub mod orchestrator;
pub mod services;
pub mod traits;
pub mod worker;

// Re-export commonly used types
pub use self::core::{build_upstream_url, mean, parse_integers, standard_deviation, EMPTY_SAMPLE_VALUE};
pub use error::{ErrorKind, OrchestratorError, OrchestratorResult, WorkerError};
pub use orchestrator::Orchestrator;
pub use services::RealRandomnessSource;
pub use traits::RandomnessSource;
pub use worker::{Worker, WorkerOutcome};
