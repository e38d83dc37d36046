// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! ragcheck CLI tool

mod report;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use ragcheck::io::{emit_records, read_records, write_records, RecordFormat};
use ragcheck::{Engine, EngineConfig, MatrixLayout, Metric, MetricGroup, Registry};
use ragcheck_eval::{EvaluationResult, Evaluator, ParallelEvaluator};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ragcheck")]
#[command(about = "Claim-level metrics for retrieval-augmented generation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a file of judged records
    Eval(EvalArgs),

    /// List metric groups
    Groups {
        /// Only show this group
        group: Option<String>,
    },

    /// Show the judgment fields metrics need
    Requirements {
        /// Metric or group names
        #[arg(default_value = "all")]
        names: Vec<String>,
    },
}

#[derive(Args)]
struct EvalArgs {
    /// Records to score (.json or .jsonl)
    #[arg(short, long)]
    input: PathBuf,

    /// Where to write scored records; stdout as JSONL if omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Metric or group names, comma separated
    #[arg(short, long, value_delimiter = ',', default_value = "all")]
    metrics: Vec<String>,

    /// Number of parallel threads (1 runs sequentially)
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    /// Engine config file (.json, .yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Label the checker uses for entailment
    #[arg(long)]
    entailment_label: Option<String>,

    /// Matrices are claims x chunks instead of chunks x claims
    #[arg(long)]
    claim_major: bool,

    /// Reject records with inconsistent dimensions
    #[arg(long)]
    strict_shapes: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Eval(args) => {
            let result = run_eval(&args)?;
            let summary = report::render_summary(&result);
            if args.output.is_some() {
                println!("{summary}");
            } else {
                eprintln!("{summary}");
            }
        }
        Commands::Groups { group } => {
            let group = group.map(|name| name.parse::<MetricGroup>()).transpose()?;
            println!("{}", report::render_groups(group));
        }
        Commands::Requirements { names } => {
            let metrics = Registry::standard().parse_selection(&names)?;
            println!("{}", report::render_requirements(Registry::standard(), &metrics));
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}

/// File config first, then command-line overrides.
fn engine_config(args: &EvalArgs) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(label) = &args.entailment_label {
        config.entailment_label = label.clone();
    }
    if args.claim_major {
        config.matrix_layout = MatrixLayout::ClaimMajor;
    }
    if args.strict_shapes {
        config.strict_shapes = true;
    }
    Ok(config)
}

fn run_eval(args: &EvalArgs) -> Result<EvaluationResult> {
    let config = engine_config(args)?;
    let engine = Engine::new(&config);
    let metrics: Vec<Metric> = engine.registry().parse_selection(&args.metrics)?;

    let mut records = read_records(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    info!(
        records = records.len(),
        metrics = metrics.len(),
        input = %args.input.display(),
        "loaded records"
    );

    let result = match args.threads {
        Some(1) => Evaluator::new(engine, &metrics).evaluate(&mut records)?,
        Some(threads) => ParallelEvaluator::new(engine, &metrics)
            .with_threads(threads)
            .evaluate(&mut records)?,
        None => ParallelEvaluator::new(engine, &metrics).evaluate(&mut records)?,
    };

    match &args.output {
        Some(path) => write_records(path, &records)
            .with_context(|| format!("writing {}", path.display()))?,
        None => emit_records(std::io::stdout().lock(), &records, RecordFormat::JsonLines)?,
    }

    Ok(result)
}
