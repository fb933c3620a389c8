use crate::types::request::{Bucket, EggSource, IvfHistory, RiskFactor};
use serde::Serialize;

pub const TRUE_KEY: &str = "TRUE";
pub const FALSE_KEY: &str = "FALSE";
pub const NOT_APPLICABLE_KEY: &str = "N/A";

/// Coefficients for one binary factor, keyed by whether the factor is present.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct FactorPair {
    pub present: f64,
    pub absent: f64,
}

impl FactorPair {
    pub fn new(present: f64, absent: f64) -> Self {
        Self { present, absent }
    }

    pub fn get(&self, value: bool) -> f64 {
        if value {
            self.present
        } else {
            self.absent
        }
    }
}

/// Coefficients for the `0` / `1` / `2+` count buckets.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BucketCoefficients([f64; 3]);

impl BucketCoefficients {
    pub fn new(zero: f64, one: f64, two_or_more: f64) -> Self {
        Self([zero, one, two_or_more])
    }

    pub fn get(&self, bucket: Bucket) -> f64 {
        self.0[bucket.index()]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Coefficients {
    pub intercept: f64,
    pub age_linear: f64,
    pub age_power: f64,
    pub age_power_factor: f64,
    pub bmi_linear: f64,
    pub bmi_power: f64,
    pub bmi_power_factor: f64,
    /// Indexed by `RiskFactor::index`.
    pub risk_factors: [FactorPair; RiskFactor::COUNT],
    pub unexplained_infertility: FactorPair,
    pub prior_pregnancies: BucketCoefficients,
    pub prior_live_births: BucketCoefficients,
}

impl Coefficients {
    pub fn risk_factor(&self, factor: RiskFactor) -> FactorPair {
        self.risk_factors[factor.index()]
    }
}

/// One row of the coefficient table. Key columns keep their raw literals so a
/// row with an unexpected key simply never matches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Formula {
    pub using_own_eggs: String,
    pub attempted_ivf_previously: String,
    pub reason_known: String,
    pub label: String,
    /// Physical line in the source table.
    pub line: u64,
    pub coefficients: Coefficients,
}

impl Formula {
    pub fn key(&self) -> (&str, &str, &str) {
        (
            self.using_own_eggs.as_str(),
            self.attempted_ivf_previously.as_str(),
            self.reason_known.as_str(),
        )
    }
}

/// Lookup key in table vocabulary. An unset egg source renders as an empty
/// literal, which no well-formed row carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormulaKey {
    pub using_own_eggs: String,
    pub attempted_ivf_previously: String,
    pub reason_known: String,
}

impl FormulaKey {
    pub fn new(egg_source: Option<EggSource>, ivf: IvfHistory, reason_known: bool) -> Self {
        Self {
            using_own_eggs: egg_source
                .map(EggSource::table_key)
                .unwrap_or_default()
                .to_string(),
            attempted_ivf_previously: ivf.table_key().to_string(),
            reason_known: bool_key(reason_known).to_string(),
        }
    }

    pub fn matches(&self, formula: &Formula) -> bool {
        formula.key()
            == (
                self.using_own_eggs.as_str(),
                self.attempted_ivf_previously.as_str(),
                self.reason_known.as_str(),
            )
    }
}

pub fn bool_key(value: bool) -> &'static str {
    if value {
        TRUE_KEY
    } else {
        FALSE_KEY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factor_pair_selects_by_presence() {
        let pair = FactorPair::new(0.25, 0.0);
        assert_eq!(pair.get(true), 0.25);
        assert_eq!(pair.get(false), 0.0);
    }

    #[test]
    fn bucket_coefficients_follow_bucket_order() {
        let buckets = BucketCoefficients::new(0.0, 0.1, 0.2);
        assert_eq!(buckets.get(Bucket::Zero), 0.0);
        assert_eq!(buckets.get(Bucket::One), 0.1);
        assert_eq!(buckets.get(Bucket::TwoOrMore), 0.2);
    }

    #[test]
    fn key_renders_table_literals() {
        let key = FormulaKey::new(Some(EggSource::Donor), IvfHistory::NotApplicable, false);
        assert_eq!(key.using_own_eggs, "FALSE");
        assert_eq!(key.attempted_ivf_previously, "N/A");
        assert_eq!(key.reason_known, "FALSE");
    }

    #[test]
    fn unset_egg_source_never_matches_a_row() {
        let formula = Formula {
            using_own_eggs: "TRUE".to_string(),
            attempted_ivf_previously: "FALSE".to_string(),
            reason_known: "TRUE".to_string(),
            label: "1-3".to_string(),
            line: 2,
            coefficients: Coefficients::default(),
        };
        let key = FormulaKey::new(None, IvfHistory::None, true);
        assert!(!key.matches(&formula));

        let key = FormulaKey::new(Some(EggSource::Own), IvfHistory::None, true);
        assert!(key.matches(&formula));
    }
}
