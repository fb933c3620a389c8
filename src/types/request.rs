use crate::types::formula::{FALSE_KEY, NOT_APPLICABLE_KEY, TRUE_KEY};
use std::collections::BTreeMap;

/// Loosely typed attribute bag as handed over by the caller. Empty values are
/// treated as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawAttributes(BTreeMap<String, String>);

impl RawAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Parses an `application/x-www-form-urlencoded` query: percent escapes
    /// are decoded and `+` reads as a space. A pair without `=` becomes a key
    /// with an empty value.
    pub fn parse_query(query: &str) -> Self {
        let mut attributes = Self::new();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            attributes.insert(key.trim(), value.trim());
        }
        attributes
    }

    /// Inserts a single literal `KEY=VALUE` argument, split on the first `=`.
    pub fn insert_argument(&mut self, argument: &str) {
        let (key, value) = argument.split_once('=').unwrap_or((argument, ""));
        self.insert(key.trim(), value.trim());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EggSource {
    Own,
    Donor,
}

impl EggSource {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Own" => Some(Self::Own),
            "Donor" => Some(Self::Donor),
            _ => None,
        }
    }

    pub fn table_key(self) -> &'static str {
        match self {
            Self::Own => TRUE_KEY,
            Self::Donor => FALSE_KEY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IvfHistory {
    None,
    Attempted,
    /// Donor-egg cycles are scored without regard to prior IVF use.
    NotApplicable,
}

impl IvfHistory {
    pub const VALUES: [&'static str; 4] = ["0", "1", "2", "3+"];

    pub fn table_key(self) -> &'static str {
        match self {
            Self::None => FALSE_KEY,
            Self::Attempted => TRUE_KEY,
            Self::NotApplicable => NOT_APPLICABLE_KEY,
        }
    }
}

/// Count bucket for prior pregnancies and live births. Variant order is the
/// ordinal scale used by the live-births check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Bucket {
    Zero,
    One,
    TwoOrMore,
}

impl Bucket {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "0" => Some(Self::Zero),
            "1" => Some(Self::One),
            "2+" => Some(Self::TwoOrMore),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Zero => "0",
            Self::One => "1",
            Self::TwoOrMore => "2+",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskFactor {
    TubalFactor,
    MaleFactorInfertility,
    Endometriosis,
    OvulatoryDisorder,
    DiminishedOvarianReserve,
    UterineFactor,
    OtherReason,
}

impl RiskFactor {
    pub const COUNT: usize = 7;

    pub const ALL: [RiskFactor; Self::COUNT] = [
        Self::TubalFactor,
        Self::MaleFactorInfertility,
        Self::Endometriosis,
        Self::OvulatoryDisorder,
        Self::DiminishedOvarianReserve,
        Self::UterineFactor,
        Self::OtherReason,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn param(self) -> &'static str {
        match self {
            Self::TubalFactor => "tubal_factor",
            Self::MaleFactorInfertility => "male_factor_infertility",
            Self::Endometriosis => "endometriosis",
            Self::OvulatoryDisorder => "ovulatory_disorder",
            Self::DiminishedOvarianReserve => "diminished_ovarian_reserve",
            Self::UterineFactor => "uterine_factor",
            Self::OtherReason => "other_reason",
        }
    }
}

/// Which of the three mutually exclusive ways the cause of infertility was
/// explained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disclosure {
    NamedFactors,
    Unexplained,
    Unknown,
}

impl Disclosure {
    pub fn reason_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Height {
    pub feet: u32,
    pub inches: u32,
}

impl Height {
    pub fn total_inches(self) -> u32 {
        self.feet.saturating_mul(12).saturating_add(self.inches)
    }
}

/// Validated, fixed-shape scoring input. Only `normalize` builds one from raw
/// attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringRequest {
    pub age: Option<u32>,
    pub weight: Option<u32>,
    pub height: Height,
    pub egg_source: Option<EggSource>,
    pub ivf_history: IvfHistory,
    pub disclosure: Disclosure,
    /// Answers indexed by `RiskFactor::index`; `None` when not disclosed.
    pub risk_factors: [Option<bool>; RiskFactor::COUNT],
    pub unexplained_infertility: Option<bool>,
    pub prior_pregnancies: Bucket,
    pub prior_live_births: Bucket,
}

impl ScoringRequest {
    pub fn risk_factor(&self, factor: RiskFactor) -> Option<bool> {
        self.risk_factors[factor.index()]
    }

    pub fn reason_known(&self) -> bool {
        self.disclosure.reason_known()
    }
}
