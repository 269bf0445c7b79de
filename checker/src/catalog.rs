//! Built-in catalog of state-sharing patterns and their stated arguments.
//!
//! Entries are compile-time data in declaration order. The order is part of
//! the report contract, so new entries go at the end.

use serde::Serialize;

use crate::core::types::{
    Contents, Guard, Mutability, OwnerScope, Rationale, SafetyArgument, SharedStateDescriptor,
    Traversal,
};

/// One catalog entry: a piece of shared state and the argument made for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pattern {
    /// Stable kebab-case identifier used on the command line and in reports.
    pub id: &'static str,
    pub title: &'static str,
    pub descriptor: SharedStateDescriptor,
    pub argument: SafetyArgument,
}

static CATALOG: [Pattern; 12] = [
    Pattern {
        id: "static-field-in-class",
        title: "Map cache held in a private static field",
        descriptor: SharedStateDescriptor::new(
            OwnerScope::ClassStatic,
            Mutability::MutableReference,
        ),
        argument: SafetyArgument::new(
            Rationale::Confinement,
            "the cache is confined to its class",
        ),
    },
    Pattern {
        id: "field-in-class",
        title: "Map cache held in a private instance field",
        descriptor: SharedStateDescriptor::new(
            OwnerScope::InstanceField,
            Mutability::MutableReference,
        ),
        argument: SafetyArgument::new(
            Rationale::Confinement,
            "the cache is confined to its object",
        ),
    },
    Pattern {
        id: "local-variable",
        title: "Map cache created in a local variable",
        descriptor: SharedStateDescriptor::new(
            OwnerScope::LocalVariable,
            Mutability::MutableReference,
        ),
        argument: SafetyArgument::new(
            Rationale::Confinement,
            "the cache is confined to the current thread",
        ),
    },
    Pattern {
        id: "final-local-variable",
        title: "Map cache created in a final local variable",
        descriptor: SharedStateDescriptor::new(
            OwnerScope::LocalVariable,
            Mutability::FinalReference,
        ),
        argument: SafetyArgument::new(
            Rationale::Confinement,
            "the cache is confined to the current thread",
        ),
    },
    Pattern {
        id: "lazy-singleton",
        title: "Singleton created on first access through a static getter",
        descriptor: SharedStateDescriptor::new(
            OwnerScope::ClassStatic,
            Mutability::MutableReference,
        )
        .lazily_initialized(),
        argument: SafetyArgument::new(
            Rationale::SingletonInvariant,
            "only one instance is ever created and that instance is threadsafe",
        ),
    },
    Pattern {
        id: "final-field-in-class",
        title: "Map cache held in a final instance field",
        descriptor: SharedStateDescriptor::new(
            OwnerScope::InstanceField,
            Mutability::FinalReference,
        ),
        argument: SafetyArgument::new(Rationale::Immutability, "the cache is immutable"),
    },
    Pattern {
        id: "immutable-by-convention",
        title: "Class of immutable values kept in non-final fields",
        descriptor: SharedStateDescriptor::new(
            OwnerScope::InstanceField,
            Mutability::MutableReference,
        )
        .holding(Contents::Immutable),
        argument: SafetyArgument::new(
            Rationale::Immutability,
            "every object in the rep is immutable and so is the class",
        ),
    },
    Pattern {
        id: "memoizing-immutable-result",
        title: "Result class that memoizes into a final map field",
        descriptor: SharedStateDescriptor::new(
            OwnerScope::InstanceField,
            Mutability::FinalReference,
        ),
        argument: SafetyArgument::new(Rationale::Immutability, "the class is immutable"),
    },
    Pattern {
        id: "unmodifiable-list-field",
        title: "Final field holding an unmodifiable list view that is iterated",
        descriptor: SharedStateDescriptor::new(
            OwnerScope::InstanceField,
            Mutability::FinalReference,
        )
        .holding(Contents::ReadOnlyView)
        .traversed(Traversal::Unlocked),
        argument: SafetyArgument::new(Rationale::Immutability, "the results list is immutable"),
    },
    Pattern {
        id: "aliased-synchronized-map",
        title: "Synchronized map wrapper whose backing map is shared with a helper",
        descriptor: SharedStateDescriptor::new(
            OwnerScope::InstanceField,
            Mutability::FinalReference,
        )
        .guarded(Guard::SynchronizedWrapper)
        .escaping(),
        argument: SafetyArgument::new(
            Rationale::ThreadsafeGuard,
            "the cache is safe for concurrency",
        ),
    },
    Pattern {
        id: "synchronized-memo-cache",
        title: "Immutable data beside a synchronized memo cache",
        descriptor: SharedStateDescriptor::new(
            OwnerScope::InstanceField,
            Mutability::FinalReference,
        )
        .guarded(Guard::SynchronizedWrapper),
        argument: SafetyArgument::new(
            Rationale::ThreadsafeGuard,
            "the data is immutable and the cache is safe for concurrency",
        ),
    },
    Pattern {
        id: "synchronized-list-iteration",
        title: "Synchronized list that is appended to and iterated",
        descriptor: SharedStateDescriptor::new(
            OwnerScope::InstanceField,
            Mutability::FinalReference,
        )
        .guarded(Guard::SynchronizedWrapper)
        .traversed(Traversal::Unlocked),
        argument: SafetyArgument::new(
            Rationale::ThreadsafeGuard,
            "the results list is safe for concurrency",
        ),
    },
];

/// All catalog entries in declaration order.
pub fn list_patterns() -> &'static [Pattern] {
    &CATALOG
}

pub fn find_pattern(id: &str) -> Option<&'static Pattern> {
    CATALOG.iter().find(|pattern| pattern.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rules::evaluate;
    use crate::core::types::{Classification, RuleId};

    fn expected(id: &str) -> (Classification, Option<RuleId>) {
        let pattern = find_pattern(id).expect("pattern exists");
        let verdict = evaluate(&pattern.descriptor, &pattern.argument);
        (verdict.classification, verdict.violated_rule)
    }

    #[test]
    fn listing_is_stable_across_calls() {
        let first: Vec<&str> = list_patterns().iter().map(|p| p.id).collect();
        let second: Vec<&str> = list_patterns().iter().map(|p| p.id).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 12);
        assert_eq!(first[0], "static-field-in-class");
        assert_eq!(first[11], "synchronized-list-iteration");
    }

    #[test]
    fn find_pattern_misses_unknown_ids() {
        assert!(find_pattern("no-such-pattern").is_none());
        assert!(find_pattern("lazy-singleton").is_some());
    }

    #[test]
    fn confinement_patterns_match_their_critiques() {
        let unsound = (
            Classification::Unsound,
            Some(RuleId::PubliclyReachableScope),
        );
        let incomplete = (
            Classification::Incomplete,
            Some(RuleId::UnprovenNoAliasNoEscape),
        );
        assert_eq!(expected("static-field-in-class"), unsound);
        assert_eq!(expected("field-in-class"), unsound);
        assert_eq!(expected("local-variable"), incomplete);
        assert_eq!(expected("final-local-variable"), incomplete);
    }

    #[test]
    fn immutability_patterns_match_their_critiques() {
        let shallow = (Classification::Unsound, Some(RuleId::ShallowImmutability));
        assert_eq!(expected("final-field-in-class"), shallow);
        assert_eq!(expected("memoizing-immutable-result"), shallow);
        assert_eq!(
            expected("immutable-by-convention"),
            (
                Classification::Incomplete,
                Some(RuleId::ImmutabilityNotEnforced)
            )
        );
        assert_eq!(
            expected("unmodifiable-list-field"),
            (
                Classification::Incomplete,
                Some(RuleId::UnstatedObserverSafety)
            )
        );
    }

    #[test]
    fn guard_patterns_match_their_critiques() {
        assert_eq!(
            expected("lazy-singleton"),
            (Classification::Unsound, Some(RuleId::UnguardedCheckThenAct))
        );
        assert_eq!(
            expected("aliased-synchronized-map"),
            (Classification::Unsound, Some(RuleId::GuardBypassedViaAlias))
        );
        assert_eq!(
            expected("synchronized-memo-cache"),
            (
                Classification::Incomplete,
                Some(RuleId::UnstatedReferenceFinality)
            )
        );
        assert_eq!(
            expected("synchronized-list-iteration"),
            (
                Classification::Incomplete,
                Some(RuleId::UnsafeCompoundIteration)
            )
        );
    }
}
