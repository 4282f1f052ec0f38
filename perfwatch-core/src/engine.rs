//! Concurrent load-testing engine.
//!
//! The engine issues `total_requests` HTTP requests against a single target,
//! bounded to `concurrency` simultaneous in-flight requests by a counting
//! semaphore. Every request terminates in exactly one [`RequestOutcome`];
//! the outcomes are reduced into a single immutable [`LoadTestResult`].

mod error;
mod outcome;
mod plan;
mod runner;
pub mod stats;

pub use error::{Error, Result};
pub use outcome::RequestOutcome;
pub use plan::{DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT, DEFAULT_TOTAL_REQUESTS, LoadPlan};
pub use runner::{ProgressFn, run_load_test};
pub use stats::LoadTestResult;
