use crate::cmd::ConfigArgs;
use crate::output::print_json;
use crate::prompt::PromptSelector;
use anyhow::Context;
use clap::Args;
use profile_core::{
    config::ProfileConfig,
    merger::IntegrityWarning,
    pipeline::Pipeline,
    select::{select_log, LatestSelector, LogKind, LogSelector},
    table,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Client log (default: discover with logs.client_pattern)
    #[arg(long, value_name = "FILE")]
    pub client: Option<PathBuf>,

    /// Server log (default: discover with logs.server_pattern)
    #[arg(long, value_name = "FILE")]
    pub server: Option<PathBuf>,

    /// Output table (default: <dir>/<prefix>YYYYmmdd_HHMM.csv)
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Pick the newest matching log instead of asking
    #[arg(long)]
    pub latest: bool,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Debug, Serialize)]
struct RunSummary<'a> {
    client: String,
    server: String,
    output: String,
    read: usize,
    sequences: usize,
    rejected: usize,
    remaining: usize,
    mean_latency_ms: Option<f64>,
    integrity_warnings: &'a [IntegrityWarning],
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

pub fn run(dir: &Path, args: RunArgs, json: bool) -> anyhow::Result<()> {
    let config = args.config.resolve(dir)?;
    let pipeline = Pipeline::new(&config).context("invalid configuration")?;

    if !json {
        println!(
            "Calculating with\n  motor_min_intensity = {}\n  mapping_curve_degree = {}\n\
             If these are not the values your motors are running on, pass --min-intensity \
             and --curve-degree or edit profile.yaml.\n",
            config.motor.min_intensity, config.motor.curve_degree
        );
    }

    let selector: &dyn LogSelector = if args.latest {
        &LatestSelector
    } else {
        &PromptSelector
    };
    let client = locate(dir, LogKind::Client, args.client, &config, selector)?;
    let server = locate(dir, LogKind::Server, args.server, &config, selector)?;

    let report = pipeline
        .run_files(&[client.as_path(), server.as_path()])
        .context("failed to reconstruct profile")?;

    let output = args.output.unwrap_or_else(|| {
        dir.join(table::output_filename(
            &config.output.prefix,
            &chrono::Local::now(),
        ))
    });
    table::save_table(&output, &report.records)
        .with_context(|| format!("failed to write {}", output.display()))?;

    if json {
        let summary = RunSummary {
            client: client.display().to_string(),
            server: server.display().to_string(),
            output: output.display().to_string(),
            read: report.read,
            sequences: report.sequences,
            rejected: report.rejected,
            remaining: report.remaining(),
            mean_latency_ms: report.mean_latency_ms(),
            integrity_warnings: &report.integrity_warnings,
        };
        print_json(&summary)?;
        return Ok(());
    }

    println!("Read {} commands...", report.read);
    println!("Grouped into {} sequences...", report.sequences);
    println!(
        "Rejected {} 'malformed' sequences - {} sequences remaining...",
        report.rejected,
        report.remaining()
    );
    for warning in &report.integrity_warnings {
        println!("[warning] {warning}");
    }
    if let Some(latency) = report.mean_latency_ms() {
        println!("Mean probe to set_pwm latency: {latency:.1} ms");
    }
    println!("Wrote output to {}", output.display());
    println!("Done!");
    Ok(())
}

fn locate(
    dir: &Path,
    kind: LogKind,
    explicit: Option<PathBuf>,
    config: &ProfileConfig,
    selector: &dyn LogSelector,
) -> anyhow::Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    let pattern = match kind {
        LogKind::Client => &config.logs.client_pattern,
        LogKind::Server => &config.logs.server_pattern,
    };
    let path = select_log(dir, kind, pattern, selector)
        .with_context(|| format!("failed to select {kind} log"))?;
    tracing::info!(%kind, path = %path.display(), "selected log");
    Ok(path)
}
