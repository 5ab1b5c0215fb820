//! Hardware-parity sweep driver.
//!
//! Runs the software floating-point and integer engines against the
//! host across entire 16-bit input spaces, in parallel, and reports
//! every divergence. A clean run exits zero; any mismatch exits one.

mod report;
mod sweep;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

use report::RunReport;
use sweep::Operation;

/// Exhaustive parity sweeps for the fpemu engines.
#[derive(Debug, Parser)]
#[command(name = "fpemu-parity", version, about)]
struct Cli {
    /// Operation to sweep; omit to sweep everything.
    #[arg(long, value_enum)]
    op: Option<Operation>,

    /// Worker threads; 0 uses every core.
    #[arg(long, default_value_t = 0)]
    jobs: usize,

    /// Mismatch samples to keep verbatim per exponent band.
    #[arg(long, default_value_t = 8)]
    keep: usize,

    /// Write the full report as JSON.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Log per-chunk progress.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install the log subscriber")?;

    if cli.jobs > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.jobs)
            .build_global()
            .context("failed to size the worker pool")?;
    }

    let operations: Vec<Operation> = match cli.op {
        Some(op) => vec![op],
        None => Operation::ALL.to_vec(),
    };

    let report = RunReport {
        summaries: operations
            .iter()
            .map(|&op| sweep::run(op, cli.keep))
            .collect(),
    };

    if let Some(path) = &cli.report {
        report.write_json(path)?;
        info!(path = %path.display(), "report written");
    }

    report.print_tables();

    let mismatches = report.total_mismatches();
    if mismatches > 0 {
        warn!(mismatches, "parity broken");
        bail!("{mismatches} mismatching pairs");
    }
    info!("all pairs match the host");
    Ok(())
}
