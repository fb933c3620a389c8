use crate::types::formula::Formula;
use crate::types::report::{Finding, ScoreReport};

pub fn to_markdown(report: &ScoreReport) -> String {
    let mut output = String::new();
    output.push_str("# IVF Success Estimate\n\n");
    output.push_str(&format!("Success rate: {:.2}%\n", report.success_rate));

    if let Some(breakdown) = &report.breakdown {
        output.push_str("\n## Breakdown\n\n");
        output.push_str(&format!(
            "- formula: {}\n- bmi: {:.1}\n- linear score: {:.6}\n\n",
            breakdown.formula, breakdown.bmi, breakdown.linear_score
        ));
        output.push_str("## Terms\n\n");
        for term in &breakdown.terms {
            output.push_str(&format!("- {}: {:+.6}\n", term.label, term.contribution));
        }
    }

    output
}

pub fn formulas_to_markdown(formulas: &[Formula], fingerprint: &str) -> String {
    let mut output = String::new();
    output.push_str("# Coefficient Table\n\n");
    output.push_str(&format!("sha256: {fingerprint}\n\n"));
    output.push_str("| formula | using own eggs | attempted IVF | reason known |\n");
    output.push_str("|---|---|---|---|\n");
    for formula in formulas {
        output.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            formula.label,
            formula.using_own_eggs,
            formula.attempted_ivf_previously,
            formula.reason_known
        ));
    }
    output
}

pub fn findings_to_markdown(findings: &[Finding]) -> String {
    let mut output = String::new();
    output.push_str("## Findings\n\n");
    if findings.is_empty() {
        output.push_str("- none\n");
    } else {
        for finding in findings {
            output.push_str(&format!(
                "- [line {}] {}: {}\n",
                finding.line, finding.title, finding.body
            ));
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::formula::Coefficients;
    use crate::types::report::{ScoreBreakdown, Term};

    #[test]
    fn markdown_report_contains_rate_and_terms() {
        let report = ScoreReport {
            success_rate: 44.39,
            breakdown: Some(ScoreBreakdown {
                formula: "1-3".to_string(),
                bmi: 25.0,
                linear_score: -0.225438,
                terms: vec![Term::new("tubal_factor=Yes", 0.09373152)],
            }),
        };

        let rendered = to_markdown(&report);
        assert!(rendered.contains("Success rate: 44.39%"));
        assert!(rendered.contains("## Terms"));
        assert!(rendered.contains("- tubal_factor=Yes: +0.093732"));
    }

    #[test]
    fn formula_listing_shows_keys_and_fingerprint() {
        let formulas = vec![Formula {
            using_own_eggs: "TRUE".to_string(),
            attempted_ivf_previously: "FALSE".to_string(),
            reason_known: "TRUE".to_string(),
            label: "1-3".to_string(),
            line: 2,
            coefficients: Coefficients::default(),
        }];

        let rendered = formulas_to_markdown(&formulas, "abc123");
        assert!(rendered.contains("sha256: abc123"));
        assert!(rendered.contains("| 1-3 | TRUE | FALSE | TRUE |"));
    }

    #[test]
    fn empty_findings_render_none() {
        assert!(findings_to_markdown(&[]).contains("- none"));
    }
}
