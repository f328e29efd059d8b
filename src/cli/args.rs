//! Command-line argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::{bounds::BoundsArgs, completions::CompletionsArgs};
use crate::cli::commands::{compute::ComputeArgs, session::SessionArgs, sweep::SweepArgs};

/// Fibre Angle Calculator - explore filament-winding parameters
#[derive(Parser, Debug)]
#[command(name = "fac", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, env = "FAC_FORMAT")]
    pub format: Option<OutputFormat>,

    /// Path to an additional config file
    #[arg(long, global = true, env = "FAC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the fibre angle curve and the velocity for a target angle
    #[command(visible_alias = "calc")]
    Compute(ComputeArgs),

    /// Print the angle at every velocity sample
    Sweep(SweepArgs),

    /// Show the valid range and default of each parameter
    Bounds(BoundsArgs),

    /// Adjust parameters interactively, recomputing after every change
    Session(SessionArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Output format selection
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pick a format based on the command
    #[default]
    Auto,
    /// Human-readable text with chart
    Text,
    /// Aligned table
    Table,
    Json,
    Yaml,
    Csv,
    Tsv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Auto => write!(f, "auto"),
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Tsv => write!(f, "tsv"),
        }
    }
}
