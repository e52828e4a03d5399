//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for debate results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Full transcript with all phases
    Full,
    /// Only the final synthesis
    Synthesis,
    /// JSON output
    Json,
}

/// CLI arguments for cabinet
#[derive(Parser, Debug)]
#[command(name = "cabinet")]
#[command(author, version, about = "Cabinet of Ministers - AI panel deliberation for decisions")]
#[command(long_about = r#"
Cabinet convenes a panel of AI ministers to deliberate a decision brief.

A debate runs in phases:
1. Opening Statements: every minister states a position and a vote
2. Rebuttal: ministers respond to each other
3. Cross-Examination: the Skeptic challenges the weakest claim
4. Closing Statements: final positions and votes
5. Synthesis: the chair compiles 2-3 actionable options

While a debate runs, type into stdin to steer it:
  stop           end the debate early (synthesis still runs)
  extend         restart the time budget
  anything else  interject - the text is put before the next minister

Configuration files are loaded from (in priority order):
1. --config <path>   Explicit config file
2. ./cabinet.toml    Project-level config
3. ~/.config/cabinet/config.toml   Global config

Example:
  cabinet run "Should I change jobs?" --goals "More autonomy" --constraints "Cannot relocate"
  cabinet rate brief-123 productivity=4 opposition=2
  cabinet cabinet
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convene the cabinet on a decision brief
    Run {
        /// The decision to deliberate
        title: String,

        /// What you want to achieve
        #[arg(short, long, default_value = "")]
        goals: String,

        /// Hard limits on acceptable plans
        #[arg(long, default_value = "")]
        constraints: String,

        /// A value you care about (can be specified multiple times)
        #[arg(long, value_name = "VALUE")]
        value: Vec<String>,

        /// Global time budget in seconds (overrides config)
        #[arg(long, value_name = "SECONDS")]
        budget: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "full")]
        output: OutputFormat,

        /// Append the transcript to a JSONL file
        #[arg(long, value_name = "PATH")]
        transcript: Option<PathBuf>,
    },

    /// Rate ministers for a finished brief (MINISTER=STARS, stars 1-5)
    Rate {
        /// Brief identifier
        brief: String,

        /// Ratings as id=stars pairs, e.g. ethics=4
        #[arg(required = true, value_name = "MINISTER=STARS")]
        ratings: Vec<String>,
    },

    /// Show the seated cabinet and reputation standings
    Cabinet,

    /// List models available for minister configuration
    Models,
}
