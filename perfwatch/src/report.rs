//! JSON report persistence under the reports directory.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::Context as _;

/// Builds `loadtest_YYYYMMDD_HHMMSS.json` from a UTC timestamp.
pub fn report_filename(now: SystemTime) -> String {
    // humantime renders 2026-08-24T12:34:56Z; keep digits, map T to _.
    let rfc3339 = humantime::format_rfc3339_seconds(now).to_string();
    let mut stamp = String::with_capacity(15);
    for ch in rfc3339.chars() {
        match ch {
            '0'..='9' => stamp.push(ch),
            'T' => stamp.push('_'),
            _ => {}
        }
    }
    format!("loadtest_{stamp}.json")
}

/// Writes the result as pretty-printed JSON and returns the report path.
pub async fn save(result: &perfwatch_core::LoadTestResult, dir: &Path) -> anyhow::Result<PathBuf> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("failed to create reports dir: {}", dir.display()))?;

    let path = dir.join(report_filename(SystemTime::now()));
    let json = serde_json::to_vec_pretty(result).context("failed to encode report json")?;
    tokio::fs::write(&path, json)
        .await
        .with_context(|| format!("failed to write report: {}", path.display()))?;

    Ok(path)
}
