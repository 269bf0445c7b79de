//! Rendering of assessments. No evaluation happens here.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::check::Assessment;
use crate::core::types::{Classification, RuleId};

/// Output format for `checker check`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Count of assessments per classification.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub valid: usize,
    pub incomplete: usize,
    pub unsound: usize,
}

/// One line per assessment: `<id> <classification> <rule>: <explanation>`.
///
/// Patterns with no violated rule show `-` in the rule column.
pub fn render_text(assessments: &[Assessment]) -> String {
    let mut out = String::new();
    for assessment in assessments {
        let verdict = &assessment.verdict;
        let rule = verdict.violated_rule.map_or("-", RuleId::as_str);
        out.push_str(&format!(
            "{} {} {}: {}\n",
            assessment.pattern_id, verdict.classification, rule, verdict.explanation
        ));
    }
    out
}

/// Pretty-printed JSON array with trailing newline.
pub fn render_json(assessments: &[Assessment]) -> Result<String> {
    let mut payload = serde_json::to_string_pretty(assessments).context("serialize report json")?;
    payload.push('\n');
    Ok(payload)
}

pub fn render(assessments: &[Assessment], format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(render_text(assessments)),
        ReportFormat::Json => render_json(assessments),
    }
}

pub fn summarize(assessments: &[Assessment]) -> Summary {
    let mut summary = Summary::default();
    for assessment in assessments {
        match assessment.verdict.classification {
            Classification::Valid => summary.valid += 1,
            Classification::Incomplete => summary.incomplete += 1,
            Classification::Unsound => summary.unsound += 1,
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Verdict;

    fn assessment(
        id: &'static str,
        classification: Classification,
        rule: Option<RuleId>,
    ) -> Assessment {
        Assessment {
            pattern_id: id,
            title: "title",
            verdict: Verdict {
                classification,
                violated_rule: rule,
                explanation: format!("{id} explained"),
            },
        }
    }

    #[test]
    fn text_has_one_line_per_assessment_in_order() {
        let rendered = render_text(&[
            assessment(
                "b",
                Classification::Unsound,
                Some(RuleId::ShallowImmutability),
            ),
            assessment("a", Classification::Valid, None),
        ]);
        assert_eq!(
            rendered,
            "b unsound ShallowImmutability: b explained\na valid -: a explained\n"
        );
    }

    #[test]
    fn text_of_nothing_is_empty() {
        assert_eq!(render_text(&[]), "");
    }

    #[test]
    fn json_flattens_verdict_fields() {
        let rendered = render_json(&[assessment(
            "a",
            Classification::Incomplete,
            Some(RuleId::UnclassifiedPattern),
        )])
        .expect("json");
        let value: serde_json::Value = serde_json::from_str(&rendered).expect("parse");
        assert_eq!(value[0]["pattern_id"], "a");
        assert_eq!(value[0]["classification"], "incomplete");
        assert_eq!(value[0]["violated_rule"], "UnclassifiedPattern");
        assert!(rendered.ends_with("]\n"));
    }

    #[test]
    fn json_renders_missing_rule_as_null() {
        let rendered =
            render_json(&[assessment("a", Classification::Valid, None)]).expect("json");
        let value: serde_json::Value = serde_json::from_str(&rendered).expect("parse");
        assert!(value[0]["violated_rule"].is_null());
    }

    #[test]
    fn summary_counts_each_classification() {
        let summary = summarize(&[
            assessment("a", Classification::Valid, None),
            assessment("b", Classification::Unsound, Some(RuleId::ShallowImmutability)),
            assessment(
                "c",
                Classification::Unsound,
                Some(RuleId::GuardBypassedViaAlias),
            ),
        ]);
        assert_eq!(
            summary,
            Summary {
                valid: 1,
                incomplete: 0,
                unsound: 2,
            }
        );
    }
}
