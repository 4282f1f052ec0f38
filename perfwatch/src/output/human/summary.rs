use std::fmt::Write as _;

use perfwatch_core::LoadTestResult;

/// Longest status-code distribution bar, in characters.
const MAX_BAR_LEN: u64 = 50;

pub(crate) fn render(result: &LoadTestResult) -> String {
    let mut out = String::new();

    out.push_str("summary\n");
    writeln!(
        &mut out,
        "  requests: {} (failed {})",
        result.total_requests, result.failed
    )
    .ok();
    writeln!(&mut out, "  success_rate: {:.1}%", result.success_rate).ok();
    writeln!(
        &mut out,
        "  latency: avg={} min={} max={} median={} stdev={}",
        format_ms(result.avg_response_time),
        format_ms(result.min_response_time),
        format_ms(result.max_response_time),
        format_ms(result.median_response_time),
        format_ms(result.stdev_response_time)
    )
    .ok();
    writeln!(
        &mut out,
        "  percentiles: p95={} p99={}",
        format_ms(result.p95_response_time),
        format_ms(result.p99_response_time)
    )
    .ok();
    writeln!(&mut out, "  rps: {:.2}", result.rps).ok();
    writeln!(&mut out, "  duration: {:.2}s", result.duration).ok();

    if !result.status_codes.is_empty() {
        out.push_str("\nstatus codes\n");
        for (code, count) in &result.status_codes {
            let bar_len = (*count).min(MAX_BAR_LEN) as usize;
            writeln!(&mut out, "  {code} {} {count}", "█".repeat(bar_len)).ok();
        }
    }

    if !result.errors.is_empty() {
        writeln!(
            &mut out,
            "\nerrors (showing {} of {} failed)",
            result.errors.len(),
            result.failed
        )
        .ok();
        for err in &result.errors {
            writeln!(&mut out, "  {err}").ok();
        }
    }

    writeln!(&mut out, "\nperformance: {}", rating(result)).ok();

    out
}

fn format_ms(ms: f64) -> String {
    format!("{ms:.2}ms")
}

/// Rating by average latency; not meaningful without at least one completed
/// request.
fn rating(result: &LoadTestResult) -> &'static str {
    if result.successful == 0 {
        return "n/a";
    }
    match result.avg_response_time {
        ms if ms < 200.0 => "excellent",
        ms if ms < 500.0 => "good",
        ms if ms < 1000.0 => "fair",
        _ => "poor",
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use std::collections::BTreeMap;

    fn result_with(avg: f64, successful: u64) -> LoadTestResult {
        LoadTestResult {
            total_requests: successful,
            successful,
            failed: 0,
            success_rate: if successful > 0 { 100.0 } else { 0.0 },
            status_codes: BTreeMap::new(),
            errors: Vec::new(),
            avg_response_time: avg,
            min_response_time: avg,
            max_response_time: avg,
            median_response_time: avg,
            stdev_response_time: 0.0,
            p95_response_time: avg,
            p99_response_time: avg,
            duration: 1.0,
            rps: successful as f64,
        }
    }

    #[test]
    fn rating_thresholds() {
        assert_eq!(rating(&result_with(150.0, 10)), "excellent");
        assert_eq!(rating(&result_with(350.0, 10)), "good");
        assert_eq!(rating(&result_with(800.0, 10)), "fair");
        assert_eq!(rating(&result_with(2000.0, 10)), "poor");
        assert_eq!(rating(&result_with(0.0, 0)), "n/a");
    }

    #[test]
    fn render_includes_counts_and_latency() {
        let mut r = result_with(123.456, 20);
        r.status_codes.insert(200, 18);
        r.status_codes.insert(404, 2);

        let text = render(&r);
        assert!(text.contains("requests: 20 (failed 0)"));
        assert!(text.contains("success_rate: 100.0%"));
        assert!(text.contains("avg=123.46ms"));
        assert!(text.contains("200 "));
        assert!(text.contains(" 18"));
        assert!(text.contains("performance: excellent"));
    }

    #[test]
    fn status_bar_is_capped() {
        let mut r = result_with(100.0, 500);
        r.status_codes.insert(200, 500);

        let text = render(&r);
        let bar_line = text
            .lines()
            .find(|l| l.trim_start().starts_with("200"))
            .unwrap();
        assert_eq!(bar_line.matches('█').count(), 50);
    }

    #[test]
    fn errors_section_lists_diagnostics() {
        let mut r = result_with(100.0, 3);
        r.total_requests = 5;
        r.failed = 2;
        r.errors = vec![
            "request 1: timed out after 1s".to_string(),
            "request 4: timed out after 1s".to_string(),
        ];

        let text = render(&r);
        assert!(text.contains("errors (showing 2 of 2 failed)"));
        assert!(text.contains("request 1: timed out after 1s"));
    }
}
