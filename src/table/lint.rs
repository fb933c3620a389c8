use crate::types::formula::{Formula, FALSE_KEY, NOT_APPLICABLE_KEY, TRUE_KEY};
use crate::types::report::Finding;
use std::collections::HashMap;

const BOOL_KEYS: [&str; 2] = [TRUE_KEY, FALSE_KEY];
const IVF_KEYS: [&str; 3] = [TRUE_KEY, FALSE_KEY, NOT_APPLICABLE_KEY];

pub fn lint_formulas(formulas: &[Formula]) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut first_seen = HashMap::<(&str, &str, &str), u64>::new();

    for formula in formulas {
        let line = formula.line;

        for (column, value, allowed) in [
            ("using own eggs", formula.using_own_eggs.as_str(), &BOOL_KEYS[..]),
            (
                "attempted IVF previously",
                formula.attempted_ivf_previously.as_str(),
                &IVF_KEYS[..],
            ),
            ("reason known", formula.reason_known.as_str(), &BOOL_KEYS[..]),
        ] {
            if !allowed.contains(&value) {
                findings.push(Finding {
                    id: "table.unknown_key".to_string(),
                    title: "Unrecognized key literal".to_string(),
                    body: format!(
                        "Formula {} has {column} = {value:?}; expected one of {}. The row can never be selected.",
                        formula.label,
                        allowed.join(", ")
                    ),
                    line,
                });
            }
        }

        match first_seen.get(&formula.key()).copied() {
            Some(first_line) => findings.push(Finding {
                id: "table.duplicate_key".to_string(),
                title: "Duplicate formula key".to_string(),
                body: format!(
                    "Formula {} repeats the key of line {first_line} and is shadowed by it.",
                    formula.label
                ),
                line,
            }),
            None => {
                first_seen.insert(formula.key(), line);
            }
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::parse_table;
    use crate::table::tests::{table_text, HEADER, ROW_1_3};

    fn lint(rows: &[&str]) -> Vec<Finding> {
        let formulas = parse_table(table_text(rows).as_bytes()).expect("table should parse");
        lint_formulas(&formulas)
    }

    #[test]
    fn clean_table_has_no_findings() {
        assert!(lint(&[ROW_1_3]).is_empty());
    }

    #[test]
    fn duplicate_keys_point_at_the_shadowed_row() {
        let findings = lint(&[ROW_1_3, ROW_1_3]);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].id, "table.duplicate_key");
        assert_eq!(findings[0].line, 3);
        assert!(findings[0].body.contains("line 2"));
    }

    #[test]
    fn duplicate_lines_skip_blank_rows() {
        let text = format!("{HEADER}\n\n{ROW_1_3}\n\n{ROW_1_3}\n");
        let formulas = parse_table(text.as_bytes()).expect("table should parse");
        let findings = lint_formulas(&formulas);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line, 5);
        assert!(findings[0].body.contains("line 3"));
    }

    #[test]
    fn unknown_key_literals_are_reported() {
        let row = ROW_1_3.replacen("TRUE,FALSE,TRUE", "yes,FALSE,TRUE", 1);
        let findings = lint(&[&row]);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].id, "table.unknown_key");
        assert!(findings[0].body.contains("using own eggs"));
    }
}
