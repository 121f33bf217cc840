//! joinplan CLI - pick the cheapest join tree for a sequence of tables.
//!
//! Reads table statistics and predicates as whitespace-separated tokens from a
//! file or stdin and prints one line: the plan and its cost.

mod output;

use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use joinplan_adapters::{read_catalog, read_catalog_from_path};
use joinplan_core::{Catalog, PlanNotation};
use joinplan_engine::{Config, CrossJoinPolicy, Optimizer};

/// Cost-based join order optimizer.
///
/// Only contiguous splits of the table order are considered. Logs go to
/// stderr; stdout carries only the result.
#[derive(Parser)]
#[command(name = "joinplan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input file; stdin when omitted or `-`
    input: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "text")]
    format: OutputFormat,

    /// How join conditions are written in the plan
    #[arg(long, default_value = "compact")]
    notation: Notation,

    /// When a split also competes as a cross join
    #[arg(long, default_value = "fallback")]
    cross_join: CrossJoin,

    /// Solve split points on all cores
    #[arg(long)]
    parallel: bool,

    /// Disable the sub-sequence memo
    #[arg(long)]
    no_memo: bool,

    /// Print the operator tree after the result
    #[arg(long)]
    explain: bool,

    /// Print search statistics to stderr
    #[arg(long)]
    stats: bool,

    /// Suppress log messages
    #[arg(long, short)]
    quiet: bool,

    /// Enable verbose debug logging
    #[arg(long, short)]
    verbose: bool,
}

/// Output format options.
#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// `<plan> <cost>` on one line
    #[default]
    Text,
    /// Machine-readable JSON
    Json,
}

/// Plan notation options.
#[derive(Clone, Copy, ValueEnum, Default)]
enum Notation {
    /// `(1 2 {a b})` for joins of two base tables
    #[default]
    Compact,
    /// `(1 2 {1.a 2.b})` everywhere
    Qualified,
}

impl From<Notation> for PlanNotation {
    fn from(n: Notation) -> Self {
        match n {
            Notation::Compact => PlanNotation::Compact,
            Notation::Qualified => PlanNotation::Qualified,
        }
    }
}

/// Cross-join policy options.
#[derive(Clone, Copy, ValueEnum, Default)]
enum CrossJoin {
    /// Only when no join predicate wins at the split
    #[default]
    Fallback,
    /// At every split
    Always,
}

impl From<CrossJoin> for CrossJoinPolicy {
    fn from(c: CrossJoin) -> Self {
        match c {
            CrossJoin::Fallback => CrossJoinPolicy::Fallback,
            CrossJoin::Always => CrossJoinPolicy::Always,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays a single result line
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_writer(io::stderr)
            .with_max_level(tracing::Level::DEBUG)
            .init();
    } else if !cli.quiet {
        tracing_subscriber::fmt()
            .with_writer(io::stderr)
            .with_max_level(tracing::Level::INFO)
            .init();
    }

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let catalog = load(cli.input.as_deref())?;

    let config = Config::default()
        .with_cross_join(cli.cross_join.into())
        .with_memoization(!cli.no_memo)
        .with_parallel(cli.parallel);
    let optimizer = Optimizer::with_config(&catalog, config);

    let started = Instant::now();
    let result = optimizer.optimize()?;
    let elapsed = started.elapsed();

    output::print_result(&result, cli.format, cli.notation.into())?;
    if cli.explain {
        println!("{}", result.plan.explain());
    }
    if cli.stats {
        output::print_stats(optimizer.catalog(), optimizer.memo_stats(), elapsed);
    }
    Ok(())
}

fn load(input: Option<&Path>) -> Result<Catalog> {
    match input {
        Some(path) if path != Path::new("-") => read_catalog_from_path(path)
            .with_context(|| format!("failed to load {}", path.display())),
        _ => read_catalog(io::stdin().lock()).context("failed to load stdin"),
    }
}
