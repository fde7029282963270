//! overrun command line
//!
//! Replays put/get scripts against either buffer policy and prints the
//! buffer after every operation.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::io::{BufWriter, Read};
use tracing::info;

use crate::config::{Config, OutputFormat};
use crate::output::TraceWriter;
use crate::ring::{AnyRingBuffer, Policy, Sample};
use crate::telemetry::init_tracing;
use crate::trace::{parse_script, replay_with, DEMO_SCRIPT};

#[derive(Parser)]
#[command(name = "overrun")]
#[command(about = "Trace fixed-capacity ring buffers under producer overrun")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Verbose mode (debug logging on stderr)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,
}

/// Buffer and output overrides shared by the replay commands
#[derive(clap::Args, Debug, Default)]
struct BufferArgs {
    /// Overflow policy
    #[arg(short, long, value_enum)]
    policy: Option<Policy>,

    /// Number of slots
    #[arg(short = 'n', long)]
    capacity: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay operations from a script file (or stdin when omitted or "-")
    #[command(alias = "r")]
    Run {
        /// Script path
        script: Option<String>,

        #[command(flatten)]
        buffer: BufferArgs,
    },

    /// Replay the built-in demonstration sequence
    #[command(alias = "d")]
    Demo {
        #[command(flatten)]
        buffer: BufferArgs,
    },

    /// Print the effective configuration as TOML
    Config,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let mut config = Config::load(cli.config.as_deref())?;

    // Apply --no-color early to disable all color output
    if cli.no_color || no_color_env(std::env::var_os("NO_COLOR").as_deref()) {
        config.output.color = false;
    }
    if !config.output.color {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Run { script, buffer } => {
            let text = read_script(script.as_deref())?;
            replay(&text, &buffer, &config)
        }
        Commands::Demo { buffer } => replay(DEMO_SCRIPT, &buffer, &config),
        Commands::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

/// NO_COLOR only counts when set to a non-empty value.
fn no_color_env(value: Option<&OsStr>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

fn read_script(path: Option<&str>) -> Result<String> {
    match path {
        None | Some("-") => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read script from stdin")?;
            Ok(buffer)
        }
        Some(p) => {
            std::fs::read_to_string(p).with_context(|| format!("Failed to read script {}", p))
        }
    }
}

fn replay(script: &str, args: &BufferArgs, config: &Config) -> Result<()> {
    let policy = args.policy.unwrap_or(config.buffer.policy);
    let capacity = args.capacity.unwrap_or(config.buffer.capacity);
    let format = args.format.unwrap_or(config.output.format);

    info!(%policy, capacity, %format, "replaying trace");
    let ops = parse_script(script)?;
    let mut buffer = AnyRingBuffer::<Sample>::with_policy(policy, capacity)?;

    let stdout = std::io::stdout();
    let mut writer = TraceWriter::new(BufWriter::new(stdout.lock()), format, config.output.color);
    replay_with(&mut buffer, &ops, |step| writer.write_step(&step))?;
    writer.finish()?;
    Ok(())
}
