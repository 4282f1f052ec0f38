#![forbid(unsafe_code)]

mod http;

pub mod engine;
pub mod validate;

pub use http::{Error as HttpError, FailureKind, HttpClient, HttpRequest, HttpResponse};

pub use engine::{
    DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT, DEFAULT_TOTAL_REQUESTS, Error, LoadPlan, LoadTestResult,
    ProgressFn, RequestOutcome, Result, run_load_test,
};

// The request types on [`LoadPlan`] come from these crates; re-exported so
// callers don't need their own dependency on them.
pub use ::http::Method;
pub use bytes::Bytes;
