//! Catalog evaluation for `checker check`.

use anyhow::{Result, bail};
use rayon::iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};
use serde::Serialize;
use tracing::debug;

use crate::catalog::{Pattern, find_pattern, list_patterns};
use crate::core::invariants::validate_catalog;
use crate::core::rules::evaluate;
use crate::core::types::Verdict;

/// How the catalog is walked. Output order is the same in both modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalMode {
    Sequential,
    Parallel,
}

/// Verdict for one catalog entry, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assessment {
    pub pattern_id: &'static str,
    pub title: &'static str,
    #[serde(flatten)]
    pub verdict: Verdict,
}

pub fn assess(pattern: &Pattern) -> Assessment {
    let verdict = evaluate(&pattern.descriptor, &pattern.argument);
    debug!(
        pattern = pattern.id,
        classification = %verdict.classification,
        rule = ?verdict.violated_rule,
        "pattern evaluated"
    );
    Assessment {
        pattern_id: pattern.id,
        title: pattern.title,
        verdict,
    }
}

/// Evaluate `patterns`, returning assessments in the order given.
pub fn evaluate_all(patterns: &[Pattern], mode: EvalMode) -> Vec<Assessment> {
    match mode {
        EvalMode::Sequential => patterns.iter().map(assess).collect(),
        EvalMode::Parallel => {
            let mut indexed: Vec<(usize, Assessment)> = patterns
                .par_iter()
                .enumerate()
                .map(|(index, pattern)| (index, assess(pattern)))
                .collect();
            indexed.sort_by_key(|(index, _)| *index);
            indexed.into_iter().map(|(_, assessment)| assessment).collect()
        }
    }
}

/// Resolve the patterns to check, keeping catalog order.
///
/// An empty selection means the whole catalog. Unknown ids are an error.
pub fn select_patterns(ids: &[String]) -> Result<Vec<Pattern>> {
    let unknown: Vec<&str> = ids
        .iter()
        .map(String::as_str)
        .filter(|id| find_pattern(id).is_none())
        .collect();
    if !unknown.is_empty() {
        bail!("unknown pattern id(s): {}", unknown.join(", "));
    }

    Ok(list_patterns()
        .iter()
        .filter(|pattern| ids.is_empty() || ids.iter().any(|id| id == pattern.id))
        .copied()
        .collect())
}

/// Validate the built-in catalog, then evaluate the selected entries.
pub fn check_catalog(ids: &[String], mode: EvalMode) -> Result<Vec<Assessment>> {
    let errors = validate_catalog(list_patterns());
    if !errors.is_empty() {
        bail!("catalog invariant violations:\n- {}", errors.join("\n- "));
    }
    let patterns = select_patterns(ids)?;
    debug!(selected = patterns.len(), ?mode, "evaluating catalog");
    Ok(evaluate_all(&patterns, mode))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Classification, RuleId};

    #[test]
    fn parallel_matches_sequential_order() {
        let sequential = evaluate_all(list_patterns(), EvalMode::Sequential);
        let parallel = evaluate_all(list_patterns(), EvalMode::Parallel);
        assert_eq!(sequential, parallel);
        let ids: Vec<&str> = parallel.iter().map(|a| a.pattern_id).collect();
        let catalog_ids: Vec<&str> = list_patterns().iter().map(|p| p.id).collect();
        assert_eq!(ids, catalog_ids);
    }

    #[test]
    fn parallel_restores_order_of_reversed_input() {
        let mut reversed: Vec<Pattern> = list_patterns().to_vec();
        reversed.reverse();
        let ids: Vec<&str> = evaluate_all(&reversed, EvalMode::Parallel)
            .iter()
            .map(|a| a.pattern_id)
            .collect();
        let expected: Vec<&str> = reversed.iter().map(|p| p.id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn selection_keeps_catalog_order() {
        let ids = vec![
            "synchronized-list-iteration".to_string(),
            "static-field-in-class".to_string(),
        ];
        let selected: Vec<&str> = select_patterns(&ids)
            .expect("select")
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(
            selected,
            vec!["static-field-in-class", "synchronized-list-iteration"]
        );
    }

    #[test]
    fn selection_rejects_unknown_ids() {
        let err = select_patterns(&["nope".to_string(), "lazy-singleton".to_string()])
            .expect_err("unknown id");
        assert_eq!(err.to_string(), "unknown pattern id(s): nope");
    }

    #[test]
    fn check_catalog_reports_every_pattern() {
        let assessments = check_catalog(&[], EvalMode::Sequential).expect("check");
        assert_eq!(assessments.len(), list_patterns().len());
        let first = &assessments[0];
        assert_eq!(first.pattern_id, "static-field-in-class");
        assert_eq!(first.verdict.classification, Classification::Unsound);
        assert_eq!(
            first.verdict.violated_rule,
            Some(RuleId::PubliclyReachableScope)
        );
    }
}
