use std::sync::Arc;
use std::time::Duration;

use perfwatch_core::{Bytes, HttpClient, LoadPlan, Method};

use crate::cli::LoadtestArgs;
use crate::output;
use crate::report;
use crate::run_error::RunError;
use crate::settings::Settings;

pub async fn run(args: LoadtestArgs) -> Result<(), RunError> {
    let out = output::formatter(args.output);

    let settings = Settings::load(args.config.as_deref()).map_err(RunError::InvalidInput)?;

    let target = perfwatch_core::validate::normalize_url(&args.url)
        .map_err(|err| RunError::InvalidInput(anyhow::anyhow!("invalid URL: {err}")))?;

    let plan = build_plan(target, &args, &settings)?;
    plan.validate()
        .map_err(|err| RunError::InvalidInput(err.into()))?;

    out.print_header(&plan);
    let progress = out.progress(plan.total_requests);

    let reports_dir = settings.reports_dir();
    let no_save = args.no_save;

    let client = Arc::new(HttpClient::default());
    let result = perfwatch_core::run_load_test(client, plan, progress)
        .await
        .map_err(|err| match err {
            err @ perfwatch_core::Error::InvalidConcurrency => RunError::InvalidInput(err.into()),
            err => RunError::RuntimeError(err.into()),
        })?;

    out.print_summary(&result).map_err(RunError::RuntimeError)?;

    if !no_save {
        let path = report::save(&result, &reports_dir)
            .await
            .map_err(RunError::RuntimeError)?;
        eprintln!("report={}", path.display());
    }

    Ok(())
}

/// Merges CLI flags over settings-file values over built-in defaults.
fn build_plan(
    target: String,
    args: &LoadtestArgs,
    settings: &Settings,
) -> Result<LoadPlan, RunError> {
    let mut plan = LoadPlan::new(target);

    if let Some(requests) = args.requests.or(settings.loadtest.requests) {
        plan.total_requests = requests;
    }
    if let Some(concurrent) = args.concurrent.or(settings.loadtest.concurrent) {
        plan.concurrency = concurrent;
    }
    if let Some(timeout) = args
        .timeout
        .or(settings.loadtest.timeout.map(Duration::from_secs))
    {
        plan.timeout = timeout;
    }

    plan.method = Method::from_bytes(args.method.to_ascii_uppercase().as_bytes())
        .map_err(|_| RunError::InvalidInput(anyhow::anyhow!("invalid HTTP method: {}", args.method)))?;
    plan.headers = args.headers.clone();
    if let Some(body) = &args.body {
        plan.body = Bytes::from(body.clone());
    }

    Ok(plan)
}
