use serde::Serialize;

/// Data-quality finding raised against a coefficient table row.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub id: String,
    pub title: String,
    pub body: String,
    pub line: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Term {
    pub label: String,
    pub contribution: f64,
}

impl Term {
    pub fn new(label: impl Into<String>, contribution: f64) -> Self {
        Self {
            label: label.into(),
            contribution,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub formula: String,
    pub bmi: f64,
    pub linear_score: f64,
    pub terms: Vec<Term>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    pub success_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<ScoreBreakdown>,
}
