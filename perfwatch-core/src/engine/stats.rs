//! Reduction of raw request outcomes into aggregate statistics.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;

use super::outcome::RequestOutcome;

/// Failure diagnostics retained verbatim; excess failures are counted only.
const MAX_RETAINED_ERRORS: usize = 10;

/// Aggregate result of one load-test run, immutable once produced.
///
/// Serialized field names are the compatibility contract for JSON reports;
/// `status_codes` uses an ordered map so repeated serializations of the same
/// result are byte-identical.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadTestResult {
    pub total_requests: u64,
    /// Completed exchanges, any status code included.
    pub successful: u64,
    pub failed: u64,
    /// Percentage in `[0, 100]`; `0` when no requests were issued.
    pub success_rate: f64,
    pub status_codes: BTreeMap<u16, u64>,
    /// First [`MAX_RETAINED_ERRORS`] failure diagnostics in encounter order.
    pub errors: Vec<String>,
    pub avg_response_time: f64,
    pub min_response_time: f64,
    pub max_response_time: f64,
    pub median_response_time: f64,
    pub stdev_response_time: f64,
    pub p95_response_time: f64,
    pub p99_response_time: f64,
    /// Wall-clock seconds for the whole run.
    pub duration: f64,
    pub rps: f64,
}

/// Folds the collected outcomes into a [`LoadTestResult`].
///
/// Latency statistics cover completed outcomes only and are all `0.0` when
/// nothing completed. The reduction is deterministic: identical outcome
/// sequences produce identical results.
#[must_use]
pub fn reduce(outcomes: &[RequestOutcome], total_requests: u64, duration: Duration) -> LoadTestResult {
    let mut latencies = Vec::with_capacity(outcomes.len());
    let mut status_codes = BTreeMap::new();
    let mut errors = Vec::new();

    for outcome in outcomes {
        match outcome {
            RequestOutcome::Completed { status, elapsed_ms } => {
                latencies.push(*elapsed_ms);
                *status_codes.entry(*status).or_insert(0u64) += 1;
            }
            RequestOutcome::Failed { detail, .. } => {
                if errors.len() < MAX_RETAINED_ERRORS {
                    errors.push(detail.clone());
                }
            }
        }
    }

    let successful = latencies.len() as u64;
    let failed = total_requests.saturating_sub(successful);

    let success_rate = if total_requests == 0 {
        0.0
    } else {
        successful as f64 / total_requests as f64 * 100.0
    };

    let duration_secs = duration.as_secs_f64();
    let rps = if duration_secs == 0.0 {
        0.0
    } else {
        total_requests as f64 / duration_secs
    };

    latencies.sort_by(|a, b| a.total_cmp(b));

    LoadTestResult {
        total_requests,
        successful,
        failed,
        success_rate,
        status_codes,
        errors,
        avg_response_time: mean(&latencies),
        min_response_time: latencies.first().copied().unwrap_or(0.0),
        max_response_time: latencies.last().copied().unwrap_or(0.0),
        median_response_time: median_sorted(&latencies),
        stdev_response_time: sample_stdev(&latencies),
        p95_response_time: percentile_sorted(&latencies, 95.0),
        p99_response_time: percentile_sorted(&latencies, 99.0),
        duration: duration_secs,
        rps,
    }
}

fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Standard median: average of the two middle values for even counts.
fn median_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    let mid = n / 2;
    if n % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Sample standard deviation (n−1 denominator); `0.0` below two samples.
fn sample_stdev(samples: &[f64]) -> f64 {
    let n = samples.len();
    if n < 2 {
        return 0.0;
    }
    let mean = mean(samples);
    let var = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n as f64 - 1.0);
    var.sqrt()
}

/// Linear-interpolation percentile (R-7) over an ascending-sorted sample.
///
/// With fractional rank `k = (n−1) × p/100`, interpolates between the
/// samples at `floor(k)` and `min(floor(k)+1, n−1)`.
fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    let k = (n - 1) as f64 * (p / 100.0);
    let f = k.floor() as usize;
    let c = (f + 1).min(n - 1);
    if f == c {
        return sorted[f];
    }
    sorted[f] + (sorted[c] - sorted[f]) * (k - f as f64)
}
