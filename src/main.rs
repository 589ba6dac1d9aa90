//! Conquest self-play CLI.
//!
//! Plays territory-conquest games between engine-controlled colors and
//! writes the turn records as JSONL.
//!
//! Usage:
//!   cargo run --release -- [OPTIONS]
//!
//! Options:
//!   --games N       Number of games to play (default: 4)
//!   --turns N       Turns per game before it is called unfinished (default: 40)
//!   --trials N      Battle simulations per odds estimate (default: 100000)
//!   --depth N       Search tree layers, root included (default: 4)
//!   --threads N     Number of parallel threads (default: 4)
//!   --seed N        Random seed, 0 for entropy (default: 0)
//!   --config FILE   JSON search configuration; flags above override it
//!   --output FILE   Output file path (default: stdout)
//!   --quiet         Suppress progress and summary output
//!
//! Log verbosity follows `RUST_LOG` (default: warn).

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;
use std::process;
use std::str::FromStr;
use std::time::Instant;

use conquest::config::{load_config, SearchConfig};
use conquest::selfplay::{self, SelfPlayConfig};

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

/// Parses the value following `flag`, exiting with usage on failure.
fn flag_value<T: FromStr>(args: &[String], i: usize, flag: &str) -> T {
    match args.get(i).map(|s| s.parse::<T>()) {
        Some(Ok(v)) => v,
        _ => {
            eprintln!("invalid {} value", flag);
            print_usage();
            process::exit(1);
        }
    }
}

fn main() {
    init_tracing("warn");

    let args: Vec<String> = env::args().collect();
    let mut config = SelfPlayConfig::default();
    let mut config_path: Option<String> = None;
    let mut output_path: Option<String> = None;
    let mut trials: Option<u32> = None;
    let mut depth: Option<u32> = None;
    let mut quiet = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--games" => {
                i += 1;
                config.num_games = flag_value(&args, i, "--games");
            }
            "--turns" => {
                i += 1;
                config.max_turns = flag_value(&args, i, "--turns");
            }
            "--trials" => {
                i += 1;
                trials = Some(flag_value(&args, i, "--trials"));
            }
            "--depth" => {
                i += 1;
                depth = Some(flag_value(&args, i, "--depth"));
            }
            "--threads" => {
                i += 1;
                config.threads = flag_value(&args, i, "--threads");
            }
            "--seed" => {
                i += 1;
                config.seed = flag_value(&args, i, "--seed");
            }
            "--config" => {
                i += 1;
                config_path = Some(flag_value(&args, i, "--config"));
            }
            "--output" => {
                i += 1;
                output_path = Some(flag_value(&args, i, "--output"));
            }
            "--quiet" => {
                quiet = true;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let mut search = match config_path {
        Some(path) => match load_config(Path::new(&path)) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{}", e);
                process::exit(1);
            }
        },
        None => SearchConfig::default(),
    };
    if let Some(t) = trials {
        search.trials = t;
    }
    if let Some(d) = depth {
        search.max_depth = d;
    }
    if let Err(e) = search.validate() {
        eprintln!("{}", e);
        process::exit(1);
    }
    config.search = search;
    config.quiet = quiet;

    if !quiet {
        eprintln!(
            "Self-play: {} games, {} turns, {} trials, depth {}, {} threads",
            config.num_games,
            config.max_turns,
            config.search.trials,
            config.search.max_depth,
            config.threads
        );
    }

    let start = Instant::now();
    let games = selfplay::run_self_play(&config);
    let elapsed = start.elapsed();

    if !quiet {
        eprintln!(
            "Completed {} games in {:.1}s",
            games.len(),
            elapsed.as_secs_f64()
        );
        selfplay::print_summary(&games);
    }

    let written = match &output_path {
        Some(path) => File::create(path).and_then(|file| {
            let mut writer = BufWriter::new(file);
            selfplay::write_jsonl(&games, &mut writer)
        }),
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            selfplay::write_jsonl(&games, &mut writer)
        }
    };
    match (written, output_path) {
        (Err(e), _) => {
            eprintln!("failed to write output: {}", e);
            process::exit(1);
        }
        (Ok(()), Some(path)) if !quiet => {
            eprintln!("Wrote {} games to {}", games.len(), path);
        }
        _ => {}
    }
}

fn print_usage() {
    eprintln!("Usage: conquest [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --games N        Number of games to play (default: 4)");
    eprintln!("  --turns N        Turns per game (default: 40)");
    eprintln!("  --trials N       Battle simulations per odds estimate (default: 100000)");
    eprintln!("  --depth N        Search tree layers, root included (default: 4)");
    eprintln!("  --threads N      Number of parallel threads (default: 4)");
    eprintln!("  --seed N         Random seed, 0 for entropy (default: 0)");
    eprintln!("  --config FILE    JSON search configuration");
    eprintln!("  --output FILE    Output file path (default: stdout)");
    eprintln!("  --quiet          Suppress progress and summary output");
    eprintln!("  --help           Show this help");
}
