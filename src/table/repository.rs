use crate::error::{EngineError, Result};
use crate::table::{load_table, LoadedTable};
use crate::types::formula::{Formula, FormulaKey};
use std::path::Path;

/// Anything that can hand out a formula for a key triple.
pub trait FormulaSource {
    fn lookup(&self, key: &FormulaKey) -> Result<&Formula>;
}

/// Read-only coefficient table, loaded once and shared by every scoring call.
#[derive(Debug, Clone)]
pub struct FormulaRepository {
    formulas: Vec<Formula>,
    fingerprint: String,
}

impl FormulaRepository {
    pub fn load(path: &Path) -> Result<Self> {
        let LoadedTable {
            formulas,
            fingerprint,
        } = load_table(path)?;
        Ok(Self::new(formulas, fingerprint))
    }

    pub fn new(formulas: Vec<Formula>, fingerprint: String) -> Self {
        Self {
            formulas,
            fingerprint,
        }
    }

    pub fn formulas(&self) -> &[Formula] {
        &self.formulas
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

impl FormulaSource for FormulaRepository {
    /// First matching row wins; duplicates are a table-quality problem.
    fn lookup(&self, key: &FormulaKey) -> Result<&Formula> {
        let formula = self
            .formulas
            .iter()
            .find(|formula| key.matches(formula))
            .ok_or_else(|| EngineError::FormulaNotFound {
                using_own_eggs: key.using_own_eggs.clone(),
                attempted_ivf_previously: key.attempted_ivf_previously.clone(),
                reason_known: key.reason_known.clone(),
            })?;
        tracing::debug!(label = %formula.label, "selected formula");
        Ok(formula)
    }
}
