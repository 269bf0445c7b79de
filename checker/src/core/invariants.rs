//! Semantic invariants of a pattern catalog.

use std::collections::HashSet;

use crate::catalog::Pattern;
use crate::core::types::{Contents, Mutability};

/// Check catalog invariants:
/// - No duplicate ids
/// - Ids are non-empty lowercase kebab-case
/// - Titles and stated explanations are non-empty
/// - No obligation is listed twice on one argument
/// - `DeeplyImmutable` state holds `Immutable` contents
pub fn validate_catalog(patterns: &[Pattern]) -> Vec<String> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();
    for (index, pattern) in patterns.iter().enumerate() {
        validate_pattern(index, pattern, &mut seen, &mut errors);
    }
    errors
}

fn validate_pattern<'a>(
    index: usize,
    pattern: &'a Pattern,
    seen: &mut HashSet<&'a str>,
    errors: &mut Vec<String>,
) {
    if !seen.insert(pattern.id) {
        errors.push(format!("duplicate id '{}' at #{}", pattern.id, index));
    }

    if !is_kebab_case(pattern.id) {
        errors.push(format!(
            "#{}: id '{}' must be lowercase kebab-case",
            index, pattern.id
        ));
    }

    if pattern.title.trim().is_empty() {
        errors.push(format!("{}: title must not be empty", pattern.id));
    }

    if pattern.argument.explanation.trim().is_empty() {
        errors.push(format!("{}: stated explanation must not be empty", pattern.id));
    }

    let descriptor = &pattern.descriptor;
    if descriptor.mutability == Mutability::DeeplyImmutable
        && descriptor.contents != Contents::Immutable
    {
        errors.push(format!(
            "{}: deeply immutable state cannot hold {:?} contents",
            pattern.id, descriptor.contents
        ));
    }

    let discharged = pattern.argument.discharged;
    for (position, obligation) in discharged.iter().enumerate() {
        if discharged[..position].contains(obligation) {
            errors.push(format!(
                "{}: obligation {:?} listed more than once",
                pattern.id, obligation
            ));
        }
    }
}

fn is_kebab_case(id: &str) -> bool {
    id.split('-').all(|part| {
        !part.is_empty()
            && part
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    })
}
