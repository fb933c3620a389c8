mod cli;
mod config;
mod engine;
mod error;
mod report;
mod table;
mod types;

use crate::error::EngineError;
use crate::report::OutputFormat;
use crate::table::FormulaRepository;
use crate::types::config::EngineConfig;
use crate::types::report::ScoreReport;
use crate::types::request::RawAttributes;
use clap::Parser;
use std::path::Path;
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const INVALID_INPUT: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn run() -> Result<i32, EngineError> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let cwd = std::env::current_dir()?;
    let loaded = config::load_config(&cwd)?;

    match cli.command {
        cli::Commands::Score(cmd) => {
            let repo = load_repository(cmd.table.as_deref(), &loaded)?;

            let mut raw = cmd
                .query
                .as_deref()
                .map(RawAttributes::parse_query)
                .unwrap_or_default();
            for param in &cmd.params {
                raw.insert_argument(param);
            }

            let request = engine::normalize(&raw, &loaded.validation)?;
            let report = if cmd.explain {
                engine::assess(&repo, &request)?
            } else {
                ScoreReport {
                    success_rate: engine::score(&repo, &request)?,
                    breakdown: None,
                }
            };

            let rendered = report::render(&report, output_format(cmd.format, &loaded)?)?;
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Formulas(cmd) => {
            let repo = load_repository(cmd.table.as_deref(), &loaded)?;
            let rendered = match output_format(cmd.format, &loaded)? {
                OutputFormat::Json => {
                    report::json::formulas_to_json(repo.formulas(), repo.fingerprint())?
                }
                OutputFormat::Md => {
                    report::md::formulas_to_markdown(repo.formulas(), repo.fingerprint())
                }
            };
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Check(cmd) => {
            let repo = load_repository(cmd.table.as_deref(), &loaded)?;
            let findings = table::lint::lint_formulas(repo.formulas());
            for finding in &findings {
                tracing::warn!(line = finding.line, id = %finding.id, "{}", finding.body);
            }

            let rendered = match output_format(cmd.format, &loaded)? {
                OutputFormat::Json => report::json::findings_to_json(&findings)?,
                OutputFormat::Md => report::md::findings_to_markdown(&findings),
            };
            println!("{rendered}");

            if findings.is_empty() {
                Ok(exit_code::SUCCESS)
            } else {
                Ok(exit_code::WARNINGS)
            }
        }
    }
}

fn load_repository(
    flag: Option<&Path>,
    loaded: &EngineConfig,
) -> Result<FormulaRepository, EngineError> {
    let path = flag.or(loaded.table.path.as_deref()).ok_or_else(|| {
        EngineError::Config(
            "no coefficient table configured; pass --table or set table.path".to_string(),
        )
    })?;
    FormulaRepository::load(path)
}

fn output_format(
    flag: Option<cli::ReportFormat>,
    loaded: &EngineConfig,
) -> Result<OutputFormat, EngineError> {
    match flag {
        Some(cli::ReportFormat::Json) => Ok(OutputFormat::Json),
        Some(cli::ReportFormat::Md) => Ok(OutputFormat::Md),
        None => OutputFormat::parse(&loaded.output.format),
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            let code = if e.is_client_fault() {
                exit_code::INVALID_INPUT
            } else {
                exit_code::RUNTIME_FAILURE
            };
            std::process::exit(code);
        }
    }
}
