mod profile;
mod replay;
mod trace;

use std::path::PathBuf;

use anyhow::{ensure, Result};
use clap::{Args, Parser, Subcommand};

use replay::Mode;

#[derive(Debug, Parser)]
#[command(name = "touchlock_replay")]
#[command(about = "Replay recorded touch-pad traces through the capture machines")]
struct Cli {
    /// TOML file overriding fields of the reference profile.
    #[arg(long, global = true)]
    profile: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Report every debounced press.
    Press(TraceArgs),
    /// Capture a numeric entry.
    Digits(DigitArgs),
    /// Capture a timed pattern using the trace timestamps.
    Pattern(TraceArgs),
}

#[derive(Debug, Args)]
struct TraceArgs {
    trace: PathBuf,
}

#[derive(Debug, Args)]
struct DigitArgs {
    trace: PathBuf,
    /// Digits to capture; defaults to the profile's ID length.
    #[arg(long)]
    count: Option<usize>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let profile = profile::load(cli.profile.as_deref())?;

    let (mode, path) = match cli.command {
        Commands::Press(args) => (Mode::Press, args.trace),
        Commands::Digits(args) => {
            let count = args.count.unwrap_or(profile.id_digits);
            ensure!(count > 0, "--count must be at least 1");
            (Mode::Digits(count), args.trace)
        }
        Commands::Pattern(args) => (Mode::Pattern, args.trace),
    };

    let samples = trace::load(&path)?;
    let replay = replay::run(mode, &profile, &samples);
    for (t_ms, event) in &replay.events {
        println!("{t_ms:>8} ms  {event}");
    }
    println!("result: {}", replay.result);
    Ok(())
}
