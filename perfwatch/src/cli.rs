use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

fn parse_duration(input: &str) -> Result<Duration, String> {
    let s = input.trim();
    if s.is_empty() {
        return Err("duration cannot be empty (expected e.g. 30s, 500ms, 1m)".to_string());
    }

    let number_end = s
        .char_indices()
        .find(|(_, ch)| !ch.is_ascii_digit())
        .map_or(s.len(), |(idx, _)| idx);

    if number_end == 0 {
        return Err(format!(
            "invalid duration '{s}' (expected e.g. 30s, 500ms, 1m)"
        ));
    }

    let (number_str, unit_str) = s.split_at(number_end);
    let value: u64 = number_str
        .parse()
        .map_err(|_| format!("invalid duration '{s}' (expected e.g. 30s, 500ms, 1m)"))?;

    let unit = unit_str.trim();
    match unit {
        "" | "s" | "sec" | "secs" | "second" | "seconds" => Ok(Duration::from_secs(value)),
        "ms" | "msec" | "msecs" | "millisecond" | "milliseconds" => {
            Ok(Duration::from_millis(value))
        }
        "m" | "min" | "mins" | "minute" | "minutes" => {
            let secs = value
                .checked_mul(60)
                .ok_or_else(|| format!("duration '{s}' is too large"))?;
            Ok(Duration::from_secs(secs))
        }
        "h" | "hr" | "hrs" | "hour" | "hours" => {
            let secs = value
                .checked_mul(60)
                .and_then(|v| v.checked_mul(60))
                .ok_or_else(|| format!("duration '{s}' is too large"))?;
            Ok(Duration::from_secs(secs))
        }
        _ => Err(format!(
            "invalid duration '{s}' (expected e.g. 30s, 500ms, 1m)"
        )),
    }
}

fn parse_header(input: &str) -> Result<(String, String), String> {
    let (name, value) = input
        .split_once(':')
        .ok_or_else(|| format!("invalid header '{input}' (expected NAME:VALUE)"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("invalid header '{input}' (empty name)"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary with a progress bar.
    HumanReadable,
    /// Emit JSON progress lines (NDJSON) to stdout.
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "perfwatch",
    author,
    version,
    about = "Website performance testing CLI",
    after_help = "Examples:\n  perfwatch loadtest --url example.com\n  perfwatch loadtest -u https://example.com/api -n 500 -c 25 -t 10s\n  perfwatch loadtest -u localhost:3000 -m POST --header 'content-type: application/json' --body '{\"ping\":true}'\n  perfwatch loadtest -u example.com --output json --no-save"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run HTTP load/stress testing against a target URL
    #[command(
        long_about = "Issue a fixed number of HTTP requests against a target URL with bounded concurrency, and report latency percentiles, throughput, and error rates.\n\nCLI flags override values from the settings file; settings override built-in defaults (requests=100, concurrent=10, timeout=30s)."
    )]
    Loadtest(LoadtestArgs),
}

#[derive(Debug, Args)]
pub struct LoadtestArgs {
    /// Target URL to test (scheme defaults to https)
    #[arg(short, long)]
    pub url: String,

    /// Total number of requests
    #[arg(short = 'n', long)]
    pub requests: Option<u64>,

    /// Number of concurrent connections
    #[arg(short, long)]
    pub concurrent: Option<u64>,

    /// Per-request timeout (e.g. 30s, 500ms, 1m)
    #[arg(short, long, value_parser = parse_duration)]
    pub timeout: Option<Duration>,

    /// HTTP method
    #[arg(short, long, default_value = "GET")]
    pub method: String,

    /// Request header, applied to every request (repeatable, NAME:VALUE)
    #[arg(long = "header", value_name = "NAME:VALUE", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Request body, applied to every request
    #[arg(long)]
    pub body: Option<String>,

    /// Settings file path (otherwise searches config/settings.yaml,
    /// settings.yaml, ~/.perfwatch/settings.yaml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::HumanReadable)]
    pub output: OutputFormat,

    /// Do not save a JSON report to the reports directory
    #[arg(long)]
    pub no_save: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_duration_accepts_common_units() {
        assert_eq!(parse_duration("500ms"), Ok(Duration::from_millis(500)));
        assert_eq!(parse_duration("30s"), Ok(Duration::from_secs(30)));
        assert_eq!(parse_duration("30"), Ok(Duration::from_secs(30)));
        assert_eq!(parse_duration("1m"), Ok(Duration::from_secs(60)));
    }

    #[test]
    fn parse_duration_rejects_invalid_values() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("abc").is_err());
        assert!(parse_duration("10x").is_err());
    }

    #[test]
    fn parse_header_splits_on_first_colon() {
        assert_eq!(
            parse_header("x-api-key: abc:def"),
            Ok(("x-api-key".to_string(), "abc:def".to_string()))
        );
        assert!(parse_header("no-colon").is_err());
        assert!(parse_header(": value").is_err());
    }

    #[test]
    fn cli_parses_loadtest_flags() {
        let parsed = Cli::try_parse_from([
            "perfwatch",
            "loadtest",
            "--url",
            "example.com",
            "-n",
            "500",
            "-c",
            "25",
            "-t",
            "10s",
            "-m",
            "POST",
            "--header",
            "content-type: application/json",
            "--body",
            "{}",
            "--output",
            "json",
            "--no-save",
        ]);

        let cli = match parsed {
            Ok(v) => v,
            Err(err) => panic!("failed to parse args: {err}"),
        };

        let Command::Loadtest(args) = cli.command;
        assert_eq!(args.url, "example.com");
        assert_eq!(args.requests, Some(500));
        assert_eq!(args.concurrent, Some(25));
        assert_eq!(args.timeout, Some(Duration::from_secs(10)));
        assert_eq!(args.method, "POST");
        assert_eq!(
            args.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        assert_eq!(args.body.as_deref(), Some("{}"));
        assert!(matches!(args.output, OutputFormat::Json));
        assert!(args.no_save);
    }

    #[test]
    fn cli_requires_url() {
        assert!(Cli::try_parse_from(["perfwatch", "loadtest"]).is_err());
    }
}
