pub mod json;
pub mod md;

use crate::error::{EngineError, Result};
use crate::types::report::ScoreReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Md,
}

impl OutputFormat {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw {
            "json" => Ok(Self::Json),
            "md" => Ok(Self::Md),
            other => Err(EngineError::Config(format!(
                "unsupported output.format: {other}"
            ))),
        }
    }
}

pub fn render(report: &ScoreReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(EngineError::Json),
        OutputFormat::Md => Ok(md::to_markdown(report)),
    }
}
