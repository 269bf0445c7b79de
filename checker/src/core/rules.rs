//! Ordered rule table for judging thread safety arguments.
//!
//! Rules are checked in table order and the first match decides the verdict,
//! so more specific rules sit above more general ones. When nothing matches,
//! the pattern is either recognizably safe (`Valid`) or conservatively rated
//! `Incomplete` with [`RuleId::UnclassifiedPattern`].

use crate::core::types::{
    Classification, Contents, Guard, Mutability, Obligation, OwnerScope, Rationale, RuleId,
    SafetyArgument, SharedStateDescriptor, Traversal, Verdict,
};

/// One row of the rule table.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub id: RuleId,
    /// Classification assigned when the rule matches.
    pub classification: Classification,
    /// One-line statement of what the argument got wrong.
    pub summary: &'static str,
    matches: fn(&SharedStateDescriptor, &SafetyArgument) -> bool,
}

impl Rule {
    pub fn matches(&self, descriptor: &SharedStateDescriptor, argument: &SafetyArgument) -> bool {
        (self.matches)(descriptor, argument)
    }
}

static RULES: [Rule; 10] = [
    Rule {
        id: RuleId::PubliclyReachableScope,
        classification: Classification::Unsound,
        summary: "static and instance state is reachable from any thread that calls a public entry point",
        matches: publicly_reachable_scope,
    },
    Rule {
        id: RuleId::ConfinedStateEscapes,
        classification: Classification::Unsound,
        summary: "a reference to the local state is handed to another object or thread",
        matches: confined_state_escapes,
    },
    Rule {
        id: RuleId::UnguardedCheckThenAct,
        classification: Classification::Unsound,
        summary: "unguarded check-then-act initialization races and can break uniqueness",
        matches: unguarded_check_then_act,
    },
    Rule {
        id: RuleId::UnprovenNoAliasNoEscape,
        classification: Classification::Incomplete,
        summary: "must show the code creates no aliases of the local and starts no thread that can see it",
        matches: unproven_no_alias_no_escape,
    },
    Rule {
        id: RuleId::ShallowImmutability,
        classification: Classification::Unsound,
        summary: "the reference cannot be reassigned but the object it points at is still mutable",
        matches: shallow_immutability,
    },
    Rule {
        id: RuleId::UnstatedObserverSafety,
        classification: Classification::Incomplete,
        summary: "relies on concurrent observers of the backing collection being safe without saying so",
        matches: unstated_observer_safety,
    },
    Rule {
        id: RuleId::ImmutabilityNotEnforced,
        classification: Classification::Incomplete,
        summary: "immutability holds only by convention; nothing stops the fields being reassigned",
        matches: immutability_not_enforced,
    },
    Rule {
        id: RuleId::GuardBypassedViaAlias,
        classification: Classification::Unsound,
        summary: "another collaborator holds an unguarded reference to the same backing state",
        matches: guard_bypassed_via_alias,
    },
    Rule {
        id: RuleId::UnsafeCompoundIteration,
        classification: Classification::Incomplete,
        summary: "per-call synchronization does not make a multi-step traversal atomic",
        matches: unsafe_compound_iteration,
    },
    Rule {
        id: RuleId::UnstatedReferenceFinality,
        classification: Classification::Incomplete,
        summary: "must state that the references to the guarded objects are never reassigned",
        matches: unstated_reference_finality,
    },
];

const UNCLASSIFIED_SUMMARY: &str = "no rule recognizes this combination of facts";

/// The rule table in priority order.
pub fn rules() -> &'static [Rule] {
    &RULES
}

/// Look up a table rule by id. `UnclassifiedPattern` is not a table rule.
pub fn find_rule(id: RuleId) -> Option<&'static Rule> {
    RULES.iter().find(|rule| rule.id == id)
}

/// Summary text for any rule id, including the fallback.
pub fn rule_summary(id: RuleId) -> &'static str {
    find_rule(id).map_or(UNCLASSIFIED_SUMMARY, |rule| rule.summary)
}

/// Judge `argument` against the facts in `descriptor`.
///
/// Pure and total: the same inputs always yield the same verdict.
pub fn evaluate(descriptor: &SharedStateDescriptor, argument: &SafetyArgument) -> Verdict {
    if let Some(rule) = RULES.iter().find(|rule| rule.matches(descriptor, argument)) {
        return Verdict {
            classification: rule.classification,
            violated_rule: Some(rule.id),
            explanation: format!("claims {}, but {}", argument.rationale.label(), rule.summary),
        };
    }

    if is_recognizably_safe(descriptor, argument) {
        return Verdict {
            classification: Classification::Valid,
            violated_rule: None,
            explanation: format!("{} holds for this state", argument.rationale.label()),
        };
    }

    Verdict {
        classification: Classification::Incomplete,
        violated_rule: Some(RuleId::UnclassifiedPattern),
        explanation: format!(
            "claims {}, but {}",
            argument.rationale.label(),
            UNCLASSIFIED_SUMMARY
        ),
    }
}

fn publicly_reachable_scope(descriptor: &SharedStateDescriptor, argument: &SafetyArgument) -> bool {
    argument.rationale == Rationale::Confinement
        && matches!(
            descriptor.owner_scope,
            OwnerScope::ClassStatic | OwnerScope::InstanceField
        )
}

fn confined_state_escapes(descriptor: &SharedStateDescriptor, argument: &SafetyArgument) -> bool {
    argument.rationale == Rationale::Confinement
        && descriptor.owner_scope == OwnerScope::LocalVariable
        && descriptor.escapes
}

fn unproven_no_alias_no_escape(
    descriptor: &SharedStateDescriptor,
    argument: &SafetyArgument,
) -> bool {
    argument.rationale == Rationale::Confinement
        && descriptor.owner_scope == OwnerScope::LocalVariable
        && !argument.states(Obligation::NoAliasNoEscape)
}

fn unguarded_check_then_act(descriptor: &SharedStateDescriptor, _: &SafetyArgument) -> bool {
    descriptor.lazy_initialization && descriptor.guard == Guard::None
}

fn shallow_immutability(descriptor: &SharedStateDescriptor, argument: &SafetyArgument) -> bool {
    argument.rationale == Rationale::Immutability
        && descriptor.mutability == Mutability::FinalReference
        && descriptor.contents == Contents::Mutable
}

fn unstated_observer_safety(descriptor: &SharedStateDescriptor, argument: &SafetyArgument) -> bool {
    argument.rationale == Rationale::Immutability
        && descriptor.contents == Contents::ReadOnlyView
        && !argument.states(Obligation::ObserverSafety)
}

fn immutability_not_enforced(descriptor: &SharedStateDescriptor, argument: &SafetyArgument) -> bool {
    argument.rationale == Rationale::Immutability
        && descriptor.mutability != Mutability::DeeplyImmutable
}

fn guard_bypassed_via_alias(descriptor: &SharedStateDescriptor, argument: &SafetyArgument) -> bool {
    argument.rationale == Rationale::ThreadsafeGuard
        && descriptor.guard.serializes_access()
        && descriptor.escapes
}

fn unsafe_compound_iteration(descriptor: &SharedStateDescriptor, _: &SafetyArgument) -> bool {
    descriptor.guard == Guard::SynchronizedWrapper && descriptor.traversal == Traversal::Unlocked
}

fn unstated_reference_finality(
    descriptor: &SharedStateDescriptor,
    argument: &SafetyArgument,
) -> bool {
    argument.rationale == Rationale::ThreadsafeGuard
        && descriptor.guard.serializes_access()
        && !argument.states(Obligation::ReferencesFinal)
}

/// Default acceptance once no rule has fired.
fn is_recognizably_safe(descriptor: &SharedStateDescriptor, argument: &SafetyArgument) -> bool {
    let deeply_immutable = descriptor.mutability == Mutability::DeeplyImmutable
        && descriptor.contents == Contents::Immutable
        && !descriptor.escapes;
    let fully_guarded = descriptor.guard.serializes_access()
        && !descriptor.escapes
        && descriptor.traversal != Traversal::Unlocked;
    let proven_confined = argument.rationale == Rationale::Confinement
        && descriptor.owner_scope == OwnerScope::LocalVariable
        && !descriptor.escapes
        && argument.states(Obligation::NoAliasNoEscape);
    deeply_immutable || fully_guarded || proven_confined
}
