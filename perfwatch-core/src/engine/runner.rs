use std::sync::Arc;
use std::sync::Mutex;
use std::time::Instant;

use tokio::sync::Semaphore;

use crate::http::{HttpClient, HttpRequest};

use super::error::{Error, Result};
use super::outcome::RequestOutcome;
use super::plan::LoadPlan;
use super::stats::{self, LoadTestResult};

/// Invoked with the new completed-request count after each outcome is
/// recorded. Calls are serialized through the collector lock, so observed
/// counts are monotonically non-decreasing and end at `total_requests`.
pub type ProgressFn = Arc<dyn Fn(u64) + Send + Sync>;

#[derive(Debug, Default)]
struct Collector {
    outcomes: Vec<RequestOutcome>,
    completed: u64,
}

/// Runs the full load test described by `plan` and reduces the outcomes.
///
/// All `total_requests` units of work are spawned up front; the semaphore,
/// not batching, bounds parallelism, so heterogeneous request latencies
/// smooth out utilization instead of lock-stepping on the slowest request of
/// a batch. A failed or timed-out request is recorded once and never
/// reissued. The returned error covers only pre-run validation and task
/// join failures; per-request failures are part of the result.
pub async fn run_load_test(
    client: Arc<HttpClient>,
    plan: LoadPlan,
    progress: Option<ProgressFn>,
) -> Result<LoadTestResult> {
    plan.validate()?;

    let permits = plan
        .concurrency
        .min(Semaphore::MAX_PERMITS as u64)
        .min(usize::MAX as u64) as usize;
    let gate = Arc::new(Semaphore::new(permits));

    let total = plan.total_requests;
    let collector = Arc::new(Mutex::new(Collector {
        outcomes: Vec::with_capacity(total.min(usize::MAX as u64) as usize),
        completed: 0,
    }));
    let plan = Arc::new(plan);

    let started = Instant::now();

    let mut handles = Vec::with_capacity(total.min(usize::MAX as u64) as usize);
    for request_id in 0..total {
        let gate = gate.clone();
        let client = client.clone();
        let plan = plan.clone();
        let collector = collector.clone();
        let progress = progress.clone();

        handles.push(tokio::spawn(async move {
            // Released on every exit path when the permit drops.
            let _permit = gate.acquire().await.map_err(|_| Error::GateClosed)?;

            let outcome = execute(&client, &plan, request_id).await;

            let mut c = collector
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            c.outcomes.push(outcome);
            c.completed += 1;
            if let Some(progress) = &progress {
                (progress)(c.completed);
            }

            Ok::<(), Error>(())
        }));
    }

    for h in handles {
        h.await??;
    }

    let duration = started.elapsed();

    let outcomes = {
        let mut c = collector
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        std::mem::take(&mut c.outcomes)
    };

    Ok(stats::reduce(&outcomes, total, duration))
}

/// Issues one request and classifies its terminal state.
///
/// Any completed HTTP exchange is a `Completed` outcome regardless of status
/// code; semantic failure analysis belongs to the consumer of the result.
async fn execute(client: &HttpClient, plan: &LoadPlan, request_id: u64) -> RequestOutcome {
    let req = HttpRequest {
        method: plan.method.clone(),
        url: plan.target.clone(),
        headers: plan.headers.clone(),
        body: plan.body.clone(),
        timeout: Some(plan.timeout),
    };

    let started = Instant::now();
    match client.request(req).await {
        Ok(res) => RequestOutcome::Completed {
            status: res.status,
            elapsed_ms: started.elapsed().as_secs_f64() * 1000.0,
        },
        Err(err) => RequestOutcome::Failed {
            kind: err.failure_kind(),
            detail: format!("request {request_id}: {err}"),
        },
    }
}
