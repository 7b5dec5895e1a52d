use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::output::OutputFormat;

/// Color output control
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal capability
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Parser, Debug)]
#[command(name = "file-probe")]
#[command(author, version, about = "Check size, count, age or presence of files against rules")]
#[command(long_about = "Evaluates rules of the form MODE|PATH|COMPARATOR[!]|THRESHOLD|COMMENT.\n\n\
    Example: TRACE|/data/in/.*\\.csv|<|M:10|No file waits longer than 10 minutes\n\n\
    Exit codes:\n  \
    0 - All rules passed\n  \
    1 - At least one rule failed\n  \
    2 - Configuration or runtime error\n  \
    3 - At least one rule was indeterminate")]
pub struct Cli {
    /// Increase log verbosity (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorChoice,

    /// Skip loading configuration file
    #[arg(long, global = true)]
    pub no_config: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate rules once
    Check(CheckArgs),

    /// Evaluate rules repeatedly, keeping TRACE history between rounds
    Watch(WatchArgs),
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Rule strings (defaults to the rules of the configuration file)
    pub rules: Vec<String>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format [possible values: text, json]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Report invalid file masks as errors instead of failed rules
    #[arg(long)]
    pub propagate_pattern_errors: bool,
}

#[derive(Parser, Debug)]
pub struct WatchArgs {
    /// Rule strings (defaults to the rules of the configuration file)
    pub rules: Vec<String>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Time between rounds: seconds or UNIT:value tokens (e.g. 30, S:30, M:1)
    #[arg(short, long)]
    pub interval: Option<String>,

    /// Stop after this many rounds (0 = run until interrupted)
    #[arg(short = 'n', long, default_value_t = 0)]
    pub iterations: u64,

    /// Output format [possible values: text, json]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Report invalid file masks as errors instead of failed rules
    #[arg(long)]
    pub propagate_pattern_errors: bool,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
