use std::sync::Arc;
use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

mod summary;

use super::OutputFormatter;

pub(crate) struct HumanReadableOutput {
    bar: Mutex<Option<ProgressBar>>,
}

impl HumanReadableOutput {
    pub(crate) fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }
}

impl OutputFormatter for HumanReadableOutput {
    fn print_header(&self, plan: &perfwatch_core::LoadPlan) {
        println!("target: {}", plan.target);
        println!(
            "requests={} concurrent={} timeout={} method={}",
            plan.total_requests,
            plan.concurrency,
            humantime::format_duration(plan.timeout),
            plan.method
        );
        println!();
    }

    fn progress(&self, total: u64) -> Option<perfwatch_core::ProgressFn> {
        let pb = ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::stderr_with_hz(5));
        pb.set_style(bar_style());
        pb.set_prefix("loadtest");

        {
            let mut slot = self
                .bar
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            *slot = Some(pb.clone());
        }

        Some(Arc::new(move |completed| {
            pb.set_position(completed);
        }))
    }

    fn print_summary(&self, result: &perfwatch_core::LoadTestResult) -> anyhow::Result<()> {
        let pb = {
            let mut slot = self
                .bar
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            slot.take()
        };
        if let Some(pb) = pb {
            pb.finish_and_clear();
        }

        print!("{}", summary::render(result));
        Ok(())
    }
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("{prefix} [ {bar:20.cyan/blue} ] {percent:>3}% {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█░")
}
