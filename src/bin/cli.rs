// CLI binary — panicking on unrecoverable errors is standard for CLI tools.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use ambient_backdrop::compose;
use ambient_backdrop::config::BackdropConfig;
use ambient_backdrop::error::BackdropError;

// ── CLI argument parsing ─────────────────────────────────────────

#[derive(Parser)]
#[command(name = "backdrop-cli", about = "Headless ambient-backdrop renderer", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (JSON). Defaults to the stock palette when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output raw JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the gradient frame at one logical time
    Frame {
        /// Logical time in milliseconds
        #[arg(long, default_value_t = 0.0)]
        time: f64,
    },
    /// Render a frame sequence at the driver's tick cadence
    Run {
        /// Number of frames to render
        #[arg(long, default_value_t = 10)]
        frames: usize,
    },
    /// Validate a config file and report the active color set
    Validate,
    /// Print the JSON schema for config files
    Schema,
}

fn load_config(path: Option<&PathBuf>) -> Result<BackdropConfig, BackdropError> {
    match path {
        Some(path) => {
            let raw = fs::read_to_string(path)?;
            Ok(serde_json::from_str(&raw)?)
        }
        None => Ok(BackdropConfig::default()),
    }
}

fn print_stops(label: &str, stops: &[compose::GradientStop]) {
    println!("{label}:");
    if stops.is_empty() {
        println!("  (empty — flat background fill)");
    }
    for stop in stops {
        println!("  {:>4}  {}", stop.offset, stop.color);
    }
}

fn run(cli: &Cli) -> Result<(), BackdropError> {
    let config = load_config(cli.config.as_ref())?;
    let snapshot = config.validate()?;

    match cli.command {
        Commands::Frame { time } => {
            let frame = compose::generate_frame(&snapshot, time);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&frame)?);
            } else {
                println!("t = {time} ms");
                print_stops("primary", &frame.primary);
                print_stops("secondary", &frame.secondary);
            }
        }
        Commands::Run { frames } => {
            for i in 0..frames {
                let t = (i as u64 * ambient_backdrop::driver::TICK_INTERVAL_MS) as f64;
                let frame = compose::generate_frame(&snapshot, t);
                if cli.json {
                    println!("{}", serde_json::to_string(&frame)?);
                } else {
                    let offsets: Vec<&str> =
                        frame.primary.iter().map(|s| s.offset.as_str()).collect();
                    println!("t = {t:>7.1} ms  primary offsets: {}", offsets.join(" "));
                }
            }
        }
        Commands::Validate => {
            if cli.json {
                let colors: Vec<String> =
                    snapshot.active_colors.iter().map(|c| c.to_hex()).collect();
                println!("{}", serde_json::to_string(&colors)?);
            } else {
                println!(
                    "Config OK: {} active color(s), background {}",
                    snapshot.active_colors.len(),
                    snapshot.background.to_hex()
                );
            }
        }
        Commands::Schema => {
            let schema = schemars::schema_for!(BackdropConfig);
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
