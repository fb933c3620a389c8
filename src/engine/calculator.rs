use crate::engine::normalize::{PRIOR_LIVE_BIRTHS, PRIOR_PREGNANCIES, UNEXPLAINED_INFERTILITY};
use crate::error::{EngineError, Result};
use crate::table::FormulaSource;
use crate::types::formula::{Coefficients, FormulaKey};
use crate::types::report::{ScoreBreakdown, ScoreReport, Term};
use crate::types::request::{Height, RiskFactor, ScoringRequest};

const BMI_FACTOR: f64 = 703.0;

/// Body mass index from pounds and feet/inches, rounded to one decimal.
pub fn bmi(weight: u32, height: Height) -> Result<f64> {
    let inches = height.total_inches();
    if inches == 0 {
        return Err(EngineError::InvalidHeight {
            feet: height.feet,
            inches: height.inches,
        });
    }
    let value = f64::from(weight) / f64::from(inches).powi(2) * BMI_FACTOR;
    Ok(round_to(value, 1))
}

/// Success probability in percent, rounded to two decimals.
pub fn score<S: FormulaSource + ?Sized>(source: &S, request: &ScoringRequest) -> Result<f64> {
    assess(source, request).map(|report| report.success_rate)
}

pub fn assess<S: FormulaSource + ?Sized>(
    source: &S,
    request: &ScoringRequest,
) -> Result<ScoreReport> {
    let bmi = bmi(request.weight.unwrap_or(0), request.height)?;
    let key = FormulaKey::new(
        request.egg_source,
        request.ivf_history,
        request.reason_known(),
    );
    let formula = source.lookup(&key)?;

    let terms = terms(&formula.coefficients, request, bmi);
    let linear_score: f64 = terms.iter().map(|term| term.contribution).sum();
    let success_rate = round_to(logistic_percent(linear_score), 2);
    tracing::debug!(
        formula = %formula.label,
        bmi,
        linear_score,
        success_rate,
        "scored request"
    );

    Ok(ScoreReport {
        success_rate,
        breakdown: Some(ScoreBreakdown {
            formula: formula.label.clone(),
            bmi,
            linear_score,
            terms,
        }),
    })
}

fn terms(c: &Coefficients, request: &ScoringRequest, bmi: f64) -> Vec<Term> {
    let age = f64::from(request.age.unwrap_or(0));
    let mut terms = vec![
        Term::new("intercept", c.intercept),
        Term::new("age", c.age_linear * age),
        Term::new("age^power", c.age_power * age.powf(c.age_power_factor)),
        Term::new("bmi", c.bmi_linear * bmi),
        Term::new("bmi^power", c.bmi_power * bmi.powf(c.bmi_power_factor)),
    ];

    for factor in RiskFactor::ALL {
        if let Some(value) = request.risk_factor(factor) {
            terms.push(Term::new(
                flag_label(factor.param(), value),
                c.risk_factor(factor).get(value),
            ));
        }
    }
    if let Some(value) = request.unexplained_infertility {
        terms.push(Term::new(
            flag_label(UNEXPLAINED_INFERTILITY, value),
            c.unexplained_infertility.get(value),
        ));
    }

    terms.push(Term::new(
        format!("{PRIOR_PREGNANCIES}={}", request.prior_pregnancies.label()),
        c.prior_pregnancies.get(request.prior_pregnancies),
    ));
    terms.push(Term::new(
        format!("{PRIOR_LIVE_BIRTHS}={}", request.prior_live_births.label()),
        c.prior_live_births.get(request.prior_live_births),
    ));
    terms
}

fn flag_label(param: &str, value: bool) -> String {
    format!("{param}={}", if value { "Yes" } else { "No" })
}

fn logistic_percent(score: f64) -> f64 {
    100.0 / (1.0 + (-score).exp())
}

/// `f64::round` rounds half away from zero.
fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}
