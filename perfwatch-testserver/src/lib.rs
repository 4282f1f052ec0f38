//! Local HTTP server for exercising the load engine in tests.
//!
//! Binds an ephemeral loopback port and serves a handful of deterministic
//! endpoints. The stats handle tracks request totals and the high-water mark
//! of simultaneously in-flight requests, so tests can assert concurrency
//! bounds.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use axum::Router;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::time::{Duration, sleep};

pub const PATH_PLAINTEXT: &str = "/plaintext";
pub const PATH_SLOW: &str = "/slow";
pub const PATH_ECHO: &str = "/echo";
pub const PATH_STATUS: &str = "/status/{code}";

#[derive(Debug, Clone, Default)]
pub struct TestServerStats {
    requests_total: Arc<AtomicU64>,
    inflight: Arc<AtomicU64>,
    max_inflight: Arc<AtomicU64>,
}

impl TestServerStats {
    fn enter(&self) -> InflightGuard {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
        let now = self.inflight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_inflight.fetch_max(now, Ordering::SeqCst);
        InflightGuard {
            inflight: self.inflight.clone(),
        }
    }

    pub fn requests_total(&self) -> u64 {
        self.requests_total.load(Ordering::Relaxed)
    }

    /// Highest number of requests observed in flight at once.
    pub fn max_inflight(&self) -> u64 {
        self.max_inflight.load(Ordering::SeqCst)
    }
}

/// Decrements the in-flight count when the handler finishes, on every exit
/// path.
struct InflightGuard {
    inflight: Arc<AtomicU64>,
}

impl Drop for InflightGuard {
    fn drop(&mut self) {
        self.inflight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone)]
pub struct TestServerUrls {
    pub base_url: String,
    pub plaintext: String,
    pub slow: String,
    pub echo: String,
}

impl TestServerUrls {
    pub fn new(base_url: String) -> Self {
        Self {
            plaintext: format!("{base_url}{PATH_PLAINTEXT}"),
            slow: format!("{base_url}{PATH_SLOW}"),
            echo: format!("{base_url}{PATH_ECHO}"),
            base_url,
        }
    }

    pub fn status(&self, code: u16) -> String {
        format!("{}/status/{code}", self.base_url)
    }
}

async fn handle_plaintext(State(stats): State<TestServerStats>) -> &'static str {
    let _guard = stats.enter();
    "Hello World!"
}

async fn handle_slow(
    State(stats): State<TestServerStats>,
    Query(query): Query<HashMap<String, String>>,
) -> &'static str {
    let _guard = stats.enter();
    let ms = query
        .get("ms")
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(50);
    sleep(Duration::from_millis(ms)).await;
    "slow"
}

async fn handle_echo(State(stats): State<TestServerStats>, body: Bytes) -> (StatusCode, Bytes) {
    let _guard = stats.enter();
    (StatusCode::OK, body)
}

async fn handle_status(
    State(stats): State<TestServerStats>,
    Path(code): Path<u16>,
) -> StatusCode {
    let _guard = stats.enter();
    StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST)
}

pub fn router(stats: TestServerStats) -> Router {
    Router::new()
        .route(PATH_PLAINTEXT, get(handle_plaintext))
        .route(PATH_SLOW, get(handle_slow))
        .route(PATH_ECHO, post(handle_echo))
        .route(PATH_STATUS, get(handle_status))
        .with_state(stats)
}

pub struct TestServer {
    urls: TestServerUrls,
    stats: TestServerStats,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<tokio::task::JoinHandle<()>>,
}

impl TestServer {
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let stats = TestServerStats::default();
        let app = router(stats.clone());

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let serve = axum::serve(listener, app).with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            });
            let _ = serve.await;
        });

        let urls = TestServerUrls::new(format!("http://{addr}"));

        Ok(Self {
            urls,
            stats,
            shutdown_tx: Some(shutdown_tx),
            task: Some(task),
        })
    }

    pub fn urls(&self) -> &TestServerUrls {
        &self.urls
    }

    pub fn stats(&self) -> &TestServerStats {
        &self.stats
    }

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }

        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if self.shutdown_tx.is_some()
            && let Some(task) = self.task.take()
        {
            task.abort();
        }
    }
}
