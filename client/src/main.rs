//! A simple CLI for the hashlearn library.

#![warn(clippy::all, clippy::pedantic)]

extern crate hashlearn_common;
use hashlearn_common::presets::Preset;
use hashlearn_common::run_stats::RunSummary;
use hashlearn_common::{
    CLIENT_VERSION, DEFAULT_MAX_ITERATIONS, LogObserver, SearchConfig, SearchEvent,
    SearchObserver, SearchOutcome, SearchStatus, run_search,
};

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;
use simple_tqdm::Tqdm;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The known puzzle to start from
    #[arg(value_enum, default_value = "original", env = "HASHLEARN_PRESET")]
    preset: Preset,

    /// Override the target digest
    #[arg(short, long, env = "HASHLEARN_TARGET")]
    target: Option<String>,

    /// Override the ordered alphabet
    #[arg(short, long, env = "HASHLEARN_ALPHABET")]
    alphabet: Option<String>,

    /// Override the candidate length
    #[arg(short, long, env = "HASHLEARN_LENGTH")]
    length: Option<usize>,

    /// Give up after this many unique attempts
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_MAX_ITERATIONS,
        env = "HASHLEARN_MAX_ITERATIONS"
    )]
    max_iterations: u64,

    /// Seed the random generator for reproducible runs
    #[arg(short, long, env = "HASHLEARN_SEED")]
    seed: Option<u64>,

    /// Repeat the search this many times and report statistics
    #[arg(short, long, default_value_t = 1, env = "HASHLEARN_RUNS")]
    runs: usize,

    /// Suppress all output
    #[arg(short, long, env = "HASHLEARN_QUIET")]
    quiet: bool,

    /// Show additional output
    #[arg(short, long, env = "HASHLEARN_VERBOSE")]
    verbose: bool,
}

/// Prints search events to the console.
struct ConsoleObserver {
    quiet: bool,
}

impl SearchObserver for ConsoleObserver {
    fn on_event(&mut self, event: &SearchEvent) {
        LogObserver.on_event(event);
        if self.quiet {
            return;
        }
        match event {
            SearchEvent::Started { .. } => println!("Looking for string..."),
            SearchEvent::Progress { iterations } => {
                println!("Currently iterating at index {iterations}");
            }
            SearchEvent::Found {
                iterations,
                candidate,
                digest,
            } => println!(
                "String found on attempt {iterations} using string {candidate} to match {digest}"
            ),
            SearchEvent::BoundReached { iterations } => {
                println!("Exiting program at index {iterations}");
            }
            SearchEvent::SpaceExhausted { iterations, prefix } => println!(
                "Exiting program at index {iterations}: every string starting with {prefix:?} was tried"
            ),
            SearchEvent::PrefixExtended { .. } => {}
        }
    }
}

/// Resolve the preset and any overrides into a search config.
fn build_config(cli: &Cli) -> Result<SearchConfig> {
    let config = cli
        .preset
        .config_with(cli.alphabet.as_deref(), cli.target.as_deref(), cli.length)
        .with_context(|| format!("Invalid search configuration for preset {}", cli.preset))?;
    Ok(config.with_max_iterations(cli.max_iterations))
}

/// Run one search, seeded if requested.
fn search_once(
    config: &SearchConfig,
    seed: Option<u64>,
    observer: &mut dyn SearchObserver,
) -> Result<SearchOutcome> {
    let outcome = match seed {
        Some(seed) => run_search(config, &mut StdRng::seed_from_u64(seed), observer),
        None => run_search(config, &mut rand::rng(), observer),
    };
    outcome.context("Search aborted")
}

fn run_single(cli: &Cli, config: &SearchConfig) -> Result<()> {
    let mut observer = ConsoleObserver { quiet: cli.quiet };
    let outcome = search_once(config, cli.seed, &mut observer)?;

    if cli.verbose {
        println!("Outcome: {}", serde_json::to_string_pretty(&outcome)?);
    } else if !cli.quiet && outcome.status == SearchStatus::Exhausted {
        println!(
            "No match after {} attempts, confirmed prefix {:?}",
            outcome.iterations, outcome.prefix
        );
    }
    Ok(())
}

fn run_repeated(cli: &Cli, config: &SearchConfig) -> Result<()> {
    let tqdm_config = simple_tqdm::Config::new()
        .with_unit(String::from("runs"))
        .with_disable(cli.quiet);

    let outcomes = (0..cli.runs)
        .tqdm_config(tqdm_config)
        .map(|run| {
            let seed = cli.seed.map(|s| s.wrapping_add(run as u64));
            search_once(config, seed, &mut LogObserver)
        })
        .collect::<Result<Vec<_>>>()?;

    let summary = RunSummary::from_outcomes(&outcomes);
    if cli.verbose {
        println!("Summary: {}", serde_json::to_string_pretty(&summary)?);
    } else if !cli.quiet {
        println!(
            "Found the string in {}/{} runs ({:.1}%)",
            summary.found,
            summary.runs,
            summary.success_rate * 100.0
        );
        if let (Some(min), Some(max), Some(mean)) = (
            summary.min_iterations,
            summary.max_iterations,
            summary.mean_iterations,
        ) {
            println!("Attempts per success: min {min}, mean {mean:.1}, max {max}");
        }
        println!(
            "Bound reached {} times, prefix dead ends {} times, mean prefix length {:.2}",
            summary.bound_reached, summary.space_exhausted, summary.mean_prefix_length
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Set up logger
    env_logger::init();

    let config = build_config(&cli)?;

    if !cli.quiet {
        println!(
            "Hashlearn Client v{} started on target {} with {} characters from {:?}.",
            CLIENT_VERSION,
            config.target(),
            config.candidate_length(),
            config.alphabet().to_string()
        );
    }
    debug!("CLI Inputs: {cli:?}");

    if cli.runs > 1 {
        run_repeated(&cli, &config)
    } else {
        run_single(&cli, &config)
    }
}
