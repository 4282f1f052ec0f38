use std::io::Write as _;
use std::sync::Arc;

use serde::Serialize;

use super::OutputFormatter;

pub(crate) struct JsonOutput;

impl OutputFormatter for JsonOutput {
    fn print_header(&self, _plan: &perfwatch_core::LoadPlan) {}

    fn progress(&self, total: u64) -> Option<perfwatch_core::ProgressFn> {
        Some(Arc::new(move |completed| {
            emit_json_line(&JsonProgressLine {
                kind: "progress",
                completed,
                total,
            });
        }))
    }

    fn print_summary(&self, result: &perfwatch_core::LoadTestResult) -> anyhow::Result<()> {
        emit_json_line(&JsonSummaryLine {
            kind: "summary",
            result,
        });
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct JsonProgressLine {
    kind: &'static str,
    completed: u64,
    total: u64,
}

#[derive(Debug, Serialize)]
struct JsonSummaryLine<'a> {
    kind: &'static str,
    #[serde(flatten)]
    result: &'a perfwatch_core::LoadTestResult,
}

fn emit_json_line<T: Serialize>(line: &T) {
    if let Ok(s) = serde_json::to_string(line) {
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        let _ = writeln!(lock, "{s}");
    }
}
