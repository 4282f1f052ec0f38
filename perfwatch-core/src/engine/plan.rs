use std::time::Duration;

use bytes::Bytes;

use super::error::{Error, Result};

pub const DEFAULT_TOTAL_REQUESTS: u64 = 100;
pub const DEFAULT_CONCURRENCY: u64 = 10;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Immutable description of one load-test run.
///
/// The target URL is expected to be validated and normalized up front (see
/// [`crate::validate`]); the engine itself does not re-check URL syntax.
#[derive(Debug, Clone)]
pub struct LoadPlan {
    pub target: String,
    pub total_requests: u64,
    /// Maximum simultaneous in-flight requests. Values above `total_requests`
    /// degrade to `total_requests` effective parallelism.
    pub concurrency: u64,
    /// Applied per request, covering the whole exchange.
    pub timeout: Duration,
    pub method: http::Method,
    /// Applied to every request identically.
    pub headers: Vec<(String, String)>,
    /// Applied to every request identically (POST/PUT payloads).
    pub body: Bytes,
}

impl LoadPlan {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            total_requests: DEFAULT_TOTAL_REQUESTS,
            concurrency: DEFAULT_CONCURRENCY,
            timeout: DEFAULT_TIMEOUT,
            method: http::Method::GET,
            headers: Vec::new(),
            body: Bytes::new(),
        }
    }

    /// Rejects configurations with undefined runtime behavior before any
    /// request is issued. `total_requests == 0` is valid and produces an
    /// all-zero result.
    pub fn validate(&self) -> Result<()> {
        if self.concurrency == 0 {
            return Err(Error::InvalidConcurrency);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let plan = LoadPlan::new("http://localhost/");
        assert_eq!(plan.total_requests, 100);
        assert_eq!(plan.concurrency, 10);
        assert_eq!(plan.timeout, Duration::from_secs(30));
        assert_eq!(plan.method, http::Method::GET);
    }

    #[test]
    fn zero_concurrency_is_rejected() {
        let mut plan = LoadPlan::new("http://localhost/");
        plan.concurrency = 0;
        assert!(matches!(plan.validate(), Err(Error::InvalidConcurrency)));
    }

    #[test]
    fn zero_total_requests_is_valid() {
        let mut plan = LoadPlan::new("http://localhost/");
        plan.total_requests = 0;
        assert!(plan.validate().is_ok());
    }
}
