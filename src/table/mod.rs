pub mod lint;
pub mod repository;

use crate::error::{EngineError, Result};
use crate::types::formula::{BucketCoefficients, Coefficients, FactorPair, Formula};
use crate::types::request::RiskFactor;
use csv::{ReaderBuilder, StringRecord, Trim};
use sha2::{Digest, Sha256};
use std::path::Path;

pub use repository::{FormulaRepository, FormulaSource};

/// Three key columns, the formula label, seven continuous terms, eight
/// present/absent pairs and two three-bucket groups.
pub const COLUMN_COUNT: usize = 33;

const CONTINUOUS_START: usize = 4;
const FACTOR_START: usize = 11;
const UNEXPLAINED_START: usize = FACTOR_START + 2 * RiskFactor::COUNT;
const PREGNANCIES_START: usize = UNEXPLAINED_START + 2;
const LIVE_BIRTHS_START: usize = PREGNANCIES_START + 3;

#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub formulas: Vec<Formula>,
    pub fingerprint: String,
}

pub fn load_table(path: &Path) -> Result<LoadedTable> {
    let bytes = std::fs::read(path).map_err(|source| EngineError::SourceUnavailable {
        path: path.display().to_string(),
        source,
    })?;
    let formulas = parse_table(bytes.as_slice())?;
    let fingerprint = sha256_hex(&bytes);
    tracing::info!(
        path = %path.display(),
        rows = formulas.len(),
        sha256 = %fingerprint,
        "loaded coefficient table"
    );
    Ok(LoadedTable {
        formulas,
        fingerprint,
    })
}

pub fn parse_table<R: std::io::Read>(source: R) -> Result<Vec<Formula>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| EngineError::MalformedSchema(format!("error reading headers: {e}")))?;
    if headers.is_empty() {
        return Err(EngineError::MalformedSchema(
            "error reading headers: table is empty".to_string(),
        ));
    }
    if headers.len() != COLUMN_COUNT {
        return Err(EngineError::MalformedSchema(format!(
            "header has {} columns, expected {COLUMN_COUNT}",
            headers.len()
        )));
    }

    let mut formulas = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|e| EngineError::MalformedSchema(format!("error reading record: {e}")))?;
        // Blank lines are skipped by the reader, so count from its position.
        let line = record.position().map_or(0, |position| position.line());
        if record.len() != COLUMN_COUNT {
            return Err(EngineError::MalformedSchema(format!(
                "record on line {line} has {} columns, expected {COLUMN_COUNT}",
                record.len()
            )));
        }
        formulas.push(formula_from_record(&record, line));
    }
    Ok(formulas)
}

fn formula_from_record(record: &StringRecord, line: u64) -> Formula {
    let text = |i: usize| record.get(i).unwrap_or_default().to_string();
    let num = |i: usize| parse_float(record.get(i).unwrap_or_default());
    let pair = |i: usize| FactorPair::new(num(i), num(i + 1));
    let buckets = |i: usize| BucketCoefficients::new(num(i), num(i + 1), num(i + 2));

    let c = CONTINUOUS_START;
    let mut risk_factors = [FactorPair::default(); RiskFactor::COUNT];
    for factor in RiskFactor::ALL {
        risk_factors[factor.index()] = pair(FACTOR_START + 2 * factor.index());
    }

    Formula {
        using_own_eggs: text(0),
        attempted_ivf_previously: text(1),
        reason_known: text(2),
        label: text(3),
        line,
        coefficients: Coefficients {
            intercept: num(c),
            age_linear: num(c + 1),
            age_power: num(c + 2),
            age_power_factor: num(c + 3),
            bmi_linear: num(c + 4),
            bmi_power: num(c + 5),
            bmi_power_factor: num(c + 6),
            risk_factors,
            unexplained_infertility: pair(UNEXPLAINED_START),
            prior_pregnancies: buckets(PREGNANCIES_START),
            prior_live_births: buckets(LIVE_BIRTHS_START),
        },
    }
}

/// Unparseable numbers load as 0.0; table authors own data quality.
fn parse_float(raw: &str) -> f64 {
    raw.parse().unwrap_or(0.0)
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{b:02x}")).collect()
}
