use crate::types::formula::Formula;
use crate::types::report::{Finding, ScoreReport};
use serde::Serialize;

#[derive(Serialize)]
struct TableListing<'a> {
    sha256: &'a str,
    formulas: &'a [Formula],
}

pub fn to_json(report: &ScoreReport) -> Result<String, serde_json::Error> {
    serde_json::to_string(report)
}

pub fn formulas_to_json(
    formulas: &[Formula],
    fingerprint: &str,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&TableListing {
        sha256: fingerprint,
        formulas,
    })
}

pub fn findings_to_json(findings: &[Finding]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(findings)
}
