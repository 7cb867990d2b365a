//! chandebug CLI
//!
//! Thin wrapper around chandebug-core for trying out filter expressions and
//! emitting debug lines from shell scripts.
//!
//! ## Usage
//!
//! ```bash
//! # Which of these channels would DEBUG enable?
//! DEBUG='api*,-api:health' chandebug check api:http api:health db
//!
//! # Same, with an explicit filter
//! chandebug --filter '*,-verbose*' check verbose:sql other
//!
//! # Format elapsed milliseconds
//! chandebug elapsed 999 1500 61000
//!
//! # Emit lines on a channel, then dump the retained history
//! chandebug --filter deploy emit deploy "fetching" "building" --history
//! ```

use std::io::IsTerminal;

use anyhow::Result;
use clap::{Parser, Subcommand};
use chandebug_core::{
    format_elapsed, ColourMode, ColourStrategy, DebugConfig, DebugContext, StdoutSink,
};

/// chandebug - named debug channels
#[derive(Parser)]
#[command(name = "chandebug")]
#[command(version = "0.1.0")]
#[command(about = "Named, filterable debug channels")]
#[command(
    long_about = "Evaluate DEBUG filter expressions and emit coloured, timestamped debug lines on named channels."
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Filter expression (default: $DEBUG)
    #[arg(short, long, global = true)]
    filter: Option<String>,

    /// Never prefix lines with the date (default: $DEBUG_HIDE_DATE)
    #[arg(long, global = true)]
    hide_date: bool,

    /// Terminal handling: auto, always or never
    #[arg(long, default_value = "auto", global = true)]
    colour: ColourMode,

    /// Colour assignment: round-robin or hash
    #[arg(long, default_value = "round-robin", global = true)]
    colour_strategy: ColourStrategy,

    /// Number of history records to keep
    #[arg(long, default_value_t = chandebug_core::DEFAULT_HISTORY_CAPACITY, global = true)]
    history_capacity: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report whether each channel would be enabled
    Check {
        /// Channel names
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Format elapsed milliseconds the way channel suffixes do
    Elapsed {
        /// Durations in milliseconds
        #[arg(required = true)]
        millis: Vec<u64>,
    },

    /// Emit messages on a channel
    Emit {
        /// Channel name
        channel: String,
        /// Messages, one line each
        #[arg(required = true)]
        messages: Vec<String>,
        /// Print the retained history afterwards
        #[arg(long)]
        history: bool,
    },
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Environment configuration with command-line overrides applied
fn build_config(cli: &Cli) -> DebugConfig {
    let mut config = DebugConfig::from_env()
        .with_interactive(cli.colour.resolve(std::io::stdout().is_terminal()))
        .with_colour_strategy(cli.colour_strategy)
        .with_history_capacity(cli.history_capacity);

    if let Some(filter) = &cli.filter {
        config = config.with_filter(filter.clone());
    }
    if cli.hide_date {
        config = config.with_hide_date(true);
    }
    config
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let config = build_config(&cli);
    tracing::debug!(filter = ?config.filter, interactive = config.interactive, "configuration loaded");

    match &cli.command {
        Commands::Check { names } => {
            let ctx = DebugContext::new(config, StdoutSink);
            for name in names {
                let state = if ctx.create(name).is_enabled() {
                    "enabled"
                } else {
                    "disabled"
                };
                println!("{}: {}", name, state);
            }
        }

        Commands::Elapsed { millis } => {
            for ms in millis {
                println!("{}", format_elapsed(*ms));
            }
        }

        Commands::Emit {
            channel,
            messages,
            history,
        } => {
            let ctx = DebugContext::new(config, StdoutSink);
            let dbg = ctx.create(channel);
            if !dbg.is_enabled() {
                tracing::info!(channel = %channel, "channel disabled by filter, nothing emitted");
            }

            for message in messages {
                dbg.emit_str(message)?;
            }

            if *history {
                let records = ctx.history().snapshot();
                println!();
                println!("History ({} records):", records.len());
                for record in records {
                    println!(
                        "  {} {} {}",
                        record.when.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
                        record.who,
                        record.log
                    );
                }
            }
        }
    }

    Ok(())
}
