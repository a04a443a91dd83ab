use std::{
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use anyhow::{ensure, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{prelude::*, EnvFilter};

use aoc2021::{day_input, leaderboard, Solver, ALL_SOLUTIONS, DEFAULT_INPUT_DIR};

#[derive(Parser)]
#[command(about = "Advent of Code 2021 solutions", args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    run: RunArgs,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct RunArgs {
    /// Days to solve
    #[arg(value_parser = clap::value_parser!(u8).range(1..=25))]
    days: Vec<u8>,

    /// Directory holding one `N.txt` input per day
    #[arg(short, long, env = "AOC_INPUTS", default_value = DEFAULT_INPUT_DIR)]
    inputs: PathBuf,
}

#[derive(Subcommand)]
enum Command {
    /// Solve puzzles, all of them if no day is given
    Run(RunArgs),
    /// Summarize a private leaderboard dump
    Leaderboard {
        /// JSON dump, defaults to the only `*.json` file in the working directory
        path: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command.unwrap_or(Command::Run(cli.run)) {
        Command::Run(RunArgs { days, inputs }) => run(&days, &inputs),
        Command::Leaderboard { path, json } => {
            let path = match path {
                Some(path) => path,
                None => leaderboard::find_dump(&std::env::current_dir()?)?,
            };
            info!("reading {}", path.display());
            let report = leaderboard::report(&leaderboard::Leaderboard::load(&path)?)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report);
            }
            Ok(())
        }
    }
}

fn run(days: &[u8], inputs: &Path) -> Result<()> {
    let explicit = !days.is_empty();
    let days = if explicit {
        days.iter().map(|&d| usize::from(d)).collect()
    } else {
        (1..=ALL_SOLUTIONS.len()).collect::<Vec<_>>()
    };

    let mut total = Duration::default();
    let mut solved = 0;
    for n in days {
        let input = match day_input(inputs, n) {
            Ok(input) => input,
            Err(e) if !explicit => {
                warn!("skipping day {}: {:#}", n, e);
                continue;
            }
            Err(e) => return Err(e),
        };
        total += execute_day(n, ALL_SOLUTIONS[n - 1], &input)?;
        solved += 1;
    }
    ensure!(solved > 0, "no inputs found in {}", inputs.display());
    println!("Total processing time: {}", format_duration(total));
    Ok(())
}

fn format_duration(dur: Duration) -> String {
    if dur.as_millis() != 0 {
        format!("{} ms", dur.as_millis())
    } else {
        format!("{} µs", dur.as_micros())
    }
}

fn execute_day(n: usize, f: Solver, input: &str) -> Result<Duration> {
    println!("Day {}:", n);

    let start = Instant::now();
    let (part1, part2) = f(input).map_err(|e| e.context(format!("day {} failed", n)))?;
    let elapsed = start.elapsed();

    println!("  Part 1: {}", part1);
    println!("  Part 2: {}", part2);
    println!("  Finished in {}", format_duration(elapsed));
    println!("---------------------");
    Ok(elapsed)
}
