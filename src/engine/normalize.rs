use crate::error::{EngineError, Result};
use crate::types::config::ValidationConfig;
use crate::types::request::{
    Bucket, Disclosure, EggSource, Height, IvfHistory, RawAttributes, RiskFactor, ScoringRequest,
};
use std::ops::RangeInclusive;

pub const AGE_RANGE: RangeInclusive<u32> = 20..=50;
pub const WEIGHT_RANGE: RangeInclusive<u32> = 80..=300;

pub const PRIOR_PREGNANCIES: &str = "gravida";
pub const PRIOR_LIVE_BIRTHS: &str = "previous_live_births";
pub const UNEXPLAINED_INFERTILITY: &str = "unexplained_infertility";
pub const REASON_NOT_KNOWN: &str = "donotknow";
pub const EGG_SOURCE: &str = "eggSource";
pub const IVF_USED: &str = "ivf_used";

/// Turns raw attributes into a complete request or fails on the first
/// offending field.
pub fn normalize(raw: &RawAttributes, options: &ValidationConfig) -> Result<ScoringRequest> {
    let strict = options.require_vitals;

    let age = ranged_int(raw, "age", AGE_RANGE, strict)?;
    let weight = ranged_int(raw, "weight", WEIGHT_RANGE, strict)?;
    let height = height(raw, strict)?;

    let prior_pregnancies = bucket(raw, PRIOR_PREGNANCIES)?;
    let prior_live_births = bucket(raw, PRIOR_LIVE_BIRTHS)?;
    if prior_live_births > prior_pregnancies {
        return Err(EngineError::InvalidCombination {
            field: PRIOR_LIVE_BIRTHS.to_string(),
            value: prior_live_births.label().to_string(),
            reason: format!("can't be greater than {PRIOR_PREGNANCIES}"),
        });
    }

    let mut risk_factors = [None; RiskFactor::COUNT];
    for factor in RiskFactor::ALL {
        let value = raw
            .get(factor.param())
            .ok_or_else(|| EngineError::required(factor.param()))?;
        risk_factors[factor.index()] = Some(yes_no(factor.param(), value)?);
    }

    let unexplained_infertility = optional_yes_no(raw, UNEXPLAINED_INFERTILITY)?;
    let reason_not_known = optional_yes_no(raw, REASON_NOT_KNOWN)?;
    let disclosure = disclosure(
        risk_factors.contains(&Some(true)),
        unexplained_infertility == Some(true),
        reason_not_known == Some(true),
    )?;

    let egg_source = match raw.get(EGG_SOURCE) {
        Some(value) => Some(
            EggSource::parse(value).ok_or_else(|| EngineError::invalid_enum(EGG_SOURCE, value))?,
        ),
        None => None,
    };
    let ivf_history = ivf_history(raw, egg_source)?;

    let request = ScoringRequest {
        age,
        weight,
        height,
        egg_source,
        ivf_history,
        disclosure,
        risk_factors,
        unexplained_infertility,
        prior_pregnancies,
        prior_live_births,
    };
    tracing::debug!(
        disclosure = ?request.disclosure,
        egg_source = ?request.egg_source,
        ivf_history = ?request.ivf_history,
        "normalized scoring request"
    );
    Ok(request)
}

fn ranged_int(
    raw: &RawAttributes,
    field: &str,
    range: RangeInclusive<u32>,
    required: bool,
) -> Result<Option<u32>> {
    let Some(value) = raw.get(field) else {
        return if required {
            Err(EngineError::required(field))
        } else {
            Ok(None)
        };
    };
    let expected = format!("between {} and {}", range.start(), range.end());
    match value.parse::<u32>() {
        Ok(parsed) if range.contains(&parsed) => Ok(Some(parsed)),
        _ => Err(EngineError::out_of_range(field, value, expected)),
    }
}

fn non_negative_int(raw: &RawAttributes, field: &str, required: bool) -> Result<Option<u32>> {
    match raw.get(field) {
        Some(value) => value
            .parse::<u32>()
            .map(Some)
            .map_err(|_| EngineError::out_of_range(field, value, "a non-negative integer")),
        None if required => Err(EngineError::required(field)),
        None => Ok(None),
    }
}

fn height(raw: &RawAttributes, required: bool) -> Result<Height> {
    let feet = non_negative_int(raw, "feet", required)?;
    let inches = non_negative_int(raw, "inches", required)?;
    let height = Height {
        feet: feet.unwrap_or(0),
        inches: inches.unwrap_or(0),
    };
    if (feet.is_some() || inches.is_some()) && height.total_inches() == 0 {
        return Err(EngineError::out_of_range(
            "height",
            &format!("{}ft {}in", height.feet, height.inches),
            "greater than zero",
        ));
    }
    Ok(height)
}

fn bucket(raw: &RawAttributes, field: &str) -> Result<Bucket> {
    let value = raw.get(field).ok_or_else(|| EngineError::required(field))?;
    Bucket::parse(value).ok_or_else(|| EngineError::invalid_enum(field, value))
}

fn yes_no(field: &str, value: &str) -> Result<bool> {
    match value {
        "Yes" => Ok(true),
        "No" => Ok(false),
        _ => Err(EngineError::invalid_enum(field, value)),
    }
}

fn optional_yes_no(raw: &RawAttributes, field: &str) -> Result<Option<bool>> {
    raw.get(field).map(|value| yes_no(field, value)).transpose()
}

fn disclosure(named_factors: bool, unexplained: bool, unknown: bool) -> Result<Disclosure> {
    match (named_factors, unexplained, unknown) {
        (true, false, false) => Ok(Disclosure::NamedFactors),
        (false, true, false) => Ok(Disclosure::Unexplained),
        (false, false, true) => Ok(Disclosure::Unknown),
        _ => Err(EngineError::AmbiguousDisclosure {
            active: [named_factors, unexplained, unknown]
                .into_iter()
                .filter(|active| *active)
                .count(),
        }),
    }
}

/// Donor cycles ignore the supplied answer entirely.
fn ivf_history(raw: &RawAttributes, egg_source: Option<EggSource>) -> Result<IvfHistory> {
    let value = raw.get(IVF_USED).ok_or_else(|| EngineError::required(IVF_USED))?;
    if egg_source == Some(EggSource::Donor) {
        return Ok(IvfHistory::NotApplicable);
    }
    match value {
        "0" => Ok(IvfHistory::None),
        _ if IvfHistory::VALUES.contains(&value) => Ok(IvfHistory::Attempted),
        _ => Err(EngineError::invalid_enum(IVF_USED, value)),
    }
}
