use crate::error::EngineError;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub table: TableConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TableConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ValidationConfig {
    /// Require age, weight, feet and inches on every request.
    #[serde(default)]
    pub require_vitals: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

fn default_format() -> String {
    "json".to_string()
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        if !matches!(self.output.format.as_str(), "json" | "md") {
            return Err(EngineError::Config(format!(
                "unsupported output.format: {}",
                self.output.format
            )));
        }

        if let Some(path) = &self.table.path {
            if path.as_os_str().is_empty() {
                return Err(EngineError::Config(
                    "table.path must not be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}
