// src/main.rs

//! `densq` command-line driver.
//!
//! ```text
//! densq -i init.q -c circ.q [-t THREADS] [--print-gates] [--check-norm]
//! ```
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`
//! (default `densq=warn`); the final state vector goes to stdout.

use anyhow::{Context, Result};
use clap::Parser;
use densq::{Simulator, SimulatorConfig, load_circuit};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "densq")]
#[command(version)]
#[command(about = "Dense state-vector quantum circuit simulator", long_about = None)]
struct Args {
    /// Initialization file (#qubits, #init)
    #[arg(short = 'i', long = "init")]
    init_file: PathBuf,

    /// Circuit file (#define, #circ)
    #[arg(short = 'c', long = "circ")]
    circ_file: PathBuf,

    /// Worker threads per gate
    #[arg(short = 't', long = "threads", default_value_t = 1, env = "DENSQ_THREADS",
          value_parser = clap::value_parser!(u64).range(1..))]
    threads: u64,

    /// Print every gate matrix before running
    #[arg(long, default_value_t = false)]
    print_gates: bool,

    /// Warn if the final state is not normalized
    #[arg(long, default_value_t = false)]
    check_norm: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "densq=warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let mut circuit = load_circuit(&args.init_file, &args.circ_file).with_context(|| {
        format!(
            "failed to load circuit from {} and {}",
            args.init_file.display(),
            args.circ_file.display()
        )
    })?;

    if args.print_gates {
        circuit.print_all_gates();
    }

    let workers = usize::try_from(args.threads).context("thread count does not fit in usize")?;
    let simulator = Simulator::with_config(SimulatorConfig {
        workers,
        check_normalization: args.check_norm,
        ..SimulatorConfig::default()
    });
    let result = simulator.run(&mut circuit).context("simulation failed")?;
    tracing::info!(%result, "done");

    circuit.print_state();
    Ok(())
}
