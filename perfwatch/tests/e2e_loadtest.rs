#![allow(clippy::unwrap_used)]

use std::collections::BTreeMap;
use std::process::Command;

use anyhow::Context as _;
use serde::Deserialize;
use perfwatch_testserver::TestServer;

#[derive(Debug, Deserialize)]
struct ProgressLine {
    completed: u64,
    total: u64,
}

#[derive(Debug, Deserialize)]
struct SummaryLine {
    total_requests: u64,
    successful: u64,
    failed: u64,
    success_rate: f64,
    status_codes: BTreeMap<String, u64>,
    rps: f64,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind")]
enum JsonLine {
    #[serde(rename = "progress")]
    Progress(ProgressLine),

    #[serde(rename = "summary")]
    Summary(SummaryLine),
}

#[tokio::test]
async fn e2e_json_output_reports_every_request() -> anyhow::Result<()> {
    let server = TestServer::start().await.context("start test server")?;
    let url = server.urls().plaintext.clone();

    let exe = env!("CARGO_BIN_EXE_perfwatch");
    let output = tokio::task::spawn_blocking(move || {
        Command::new(exe)
            .arg("loadtest")
            .arg("--url")
            .arg(&url)
            .arg("-n")
            .arg("30")
            .arg("-c")
            .arg("5")
            .arg("-t")
            .arg("5s")
            .arg("--output")
            .arg("json")
            .arg("--no-save")
            .output()
    })
    .await??;

    assert!(
        output.status.success(),
        "perfwatch failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout)?;
    let mut last_progress = 0u64;
    let mut summary = None;

    for line in stdout.lines().filter(|l| !l.trim().is_empty()) {
        match serde_json::from_str::<JsonLine>(line)
            .with_context(|| format!("bad json line: {line}"))?
        {
            JsonLine::Progress(p) => {
                assert!(p.completed > last_progress, "progress went backwards");
                assert_eq!(p.total, 30);
                last_progress = p.completed;
            }
            JsonLine::Summary(s) => summary = Some(s),
        }
    }

    let summary = summary.context("no summary line in output")?;
    assert_eq!(last_progress, 30);
    assert_eq!(summary.total_requests, 30);
    assert_eq!(summary.successful, 30);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.success_rate, 100.0);
    assert_eq!(summary.status_codes.get("200"), Some(&30));
    assert!(summary.rps > 0.0);

    assert_eq!(server.stats().requests_total(), 30);
    assert!(server.stats().max_inflight() <= 5);

    server.shutdown().await;
    Ok(())
}
