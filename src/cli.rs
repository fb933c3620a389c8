use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ivf-success",
    version,
    about = "IVF success probability estimator backed by a regression coefficient table"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate patient attributes and print the estimated success rate
    Score(ScoreCommand),
    /// List the formulas of a coefficient table
    Formulas(TableCommand),
    /// Report data-quality problems in a coefficient table
    Check(TableCommand),
}

#[derive(Args)]
pub struct ScoreCommand {
    /// Attributes as literal KEY=VALUE, e.g. age=35 gravida=2+ eggSource=Own
    #[arg(value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// Attributes as a URL-encoded query string, e.g. "age=35&gravida=2%2B"
    #[arg(long)]
    pub query: Option<String>,

    /// Coefficient table (CSV); overrides table.path from config
    #[arg(long)]
    pub table: Option<PathBuf>,

    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Include the per-term breakdown of the regression score
    #[arg(long)]
    pub explain: bool,
}

#[derive(Args)]
pub struct TableCommand {
    /// Coefficient table (CSV); overrides table.path from config
    #[arg(long)]
    pub table: Option<PathBuf>,

    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}
