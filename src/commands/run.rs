//! Implementation of `quill run` and the single-stage commands.

use crate::config::Config;
use crate::error::Result;
use crate::events::EventLog;
use crate::pipeline::{ArtifactStore, Pipeline, Stage, StageReport};
use crate::resolver::CredentialResolver;
use crate::runtime::RuntimeClient;
use std::path::Path;

/// Execute `quill run`: every stage from `from` onward.
pub fn cmd_run(config: &Config, from: Stage) -> Result<()> {
    with_pipeline(config, |pipeline, work_dir| {
        let reports = pipeline.run_from(from)?;
        for report in &reports {
            println!("{}", format_report(report, work_dir));
        }
        if let Some(last) = reports.last() {
            println!();
            println!("Pipeline finished: {}", last.output_path.display());
        }
        Ok(())
    })
}

/// Execute one of `quill draft`, `quill validate` or `quill polish`.
pub fn cmd_stage(config: &Config, stage: Stage) -> Result<()> {
    with_pipeline(config, |pipeline, work_dir| {
        let report = pipeline.run_stage(stage)?;
        println!("{}", format_report(&report, work_dir));
        Ok(())
    })
}

fn with_pipeline<F>(config: &Config, f: F) -> Result<()>
where
    F: FnOnce(&Pipeline<'_>, &Path) -> Result<()>,
{
    let resolver = CredentialResolver::from_config(config)?;
    let runtime = RuntimeClient::from_config(&config.pipeline)?;
    let store = ArtifactStore::from_config(config);
    let events = EventLog::new(config.event_log_path());

    let pipeline = Pipeline::new(&config.pipeline, &store, &resolver, &runtime, &events);
    f(&pipeline, store.work_dir())
}

/// One summary line per completed stage.
fn format_report(report: &StageReport, work_dir: &Path) -> String {
    let output = report
        .output_path
        .strip_prefix(work_dir)
        .unwrap_or(&report.output_path);
    let calls = if report.invocations == 1 { "call" } else { "calls" };

    let mut line = format!(
        "{:8} wrote {} ({} bytes, {} {})",
        report.stage.to_string(),
        output.display(),
        report.bytes,
        report.invocations,
        calls
    );
    if let Some(verdict) = report.verdict {
        line.push_str(&format!(", verdict: {}", verdict));
    }
    line
}
