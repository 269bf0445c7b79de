//! Shared deterministic types for the checker core.
//!
//! These types describe one piece of potentially shared state, the argument
//! made for its thread safety, and the verdict reached about that argument.
//! They are plain `Copy` data so catalog entries can live in `static` items.

use std::fmt;

use serde::Serialize;

/// Where the shared state lives, which decides how many call sites reach it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnerScope {
    ClassStatic,
    InstanceField,
    LocalVariable,
}

/// How the reference to the state may change after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mutability {
    /// The reference itself can be reassigned.
    MutableReference,
    /// The reference cannot be reassigned; its target may still change.
    FinalReference,
    /// The whole reachable object graph is fixed after construction, and a
    /// language mechanism enforces it.
    DeeplyImmutable,
}

/// Synchronization mechanism protecting the state, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Guard {
    None,
    SynchronizedWrapper,
    Lock,
    ConfinementOnly,
}

impl Guard {
    /// True for guards that serialize access (wrapper or explicit lock).
    pub fn serializes_access(self) -> bool {
        matches!(self, Guard::SynchronizedWrapper | Guard::Lock)
    }
}

/// What the reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Contents {
    /// The target's own fields can be modified.
    Mutable,
    /// A read-only view over a backing collection nobody else holds.
    ReadOnlyView,
    /// Values of immutable types (strings, integers, ...).
    Immutable,
}

/// Whether the state is read through a multi-step traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Traversal {
    None,
    /// Iterated without a lock spanning the whole traversal.
    Unlocked,
    /// Iterated while holding a scoped lock for the whole traversal.
    HeldLock,
}

/// Fact sheet for one piece of state that may be shared across threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SharedStateDescriptor {
    pub owner_scope: OwnerScope,
    pub mutability: Mutability,
    pub guard: Guard,
    /// A reference to the state is handed to another object or thread.
    pub escapes: bool,
    /// The reference is computed on first access with a check-then-act.
    pub lazy_initialization: bool,
    pub contents: Contents,
    pub traversal: Traversal,
}

impl SharedStateDescriptor {
    /// Unguarded, non-escaping, eagerly initialized state. Contents are
    /// mutable unless `mutability` is `DeeplyImmutable`, which covers the
    /// whole reachable graph.
    pub const fn new(owner_scope: OwnerScope, mutability: Mutability) -> Self {
        let contents = match mutability {
            Mutability::DeeplyImmutable => Contents::Immutable,
            Mutability::MutableReference | Mutability::FinalReference => Contents::Mutable,
        };
        Self {
            owner_scope,
            mutability,
            guard: Guard::None,
            escapes: false,
            lazy_initialization: false,
            contents,
            traversal: Traversal::None,
        }
    }

    pub const fn guarded(self, guard: Guard) -> Self {
        Self { guard, ..self }
    }

    pub const fn escaping(self) -> Self {
        Self {
            escapes: true,
            ..self
        }
    }

    pub const fn lazily_initialized(self) -> Self {
        Self {
            lazy_initialization: true,
            ..self
        }
    }

    pub const fn holding(self, contents: Contents) -> Self {
        Self { contents, ..self }
    }

    pub const fn traversed(self, traversal: Traversal) -> Self {
        Self { traversal, ..self }
    }
}

/// The kind of reasoning a safety argument relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rationale {
    Confinement,
    Immutability,
    ThreadsafeGuard,
    SingletonInvariant,
}

impl Rationale {
    pub fn label(self) -> &'static str {
        match self {
            Rationale::Confinement => "confinement",
            Rationale::Immutability => "immutability",
            Rationale::ThreadsafeGuard => "a threadsafe guard",
            Rationale::SingletonInvariant => "a singleton invariant",
        }
    }
}

/// A fact an argument must state explicitly for its rationale to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Obligation {
    /// No aliases of the state are created and no thread that can see it is
    /// started.
    NoAliasNoEscape,
    /// Concurrent calls to the backing collection's observers are safe.
    ObserverSafety,
    /// The references to the guarded objects are never reassigned.
    ReferencesFinal,
}

/// The thread safety claim attached to a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SafetyArgument {
    pub rationale: Rationale,
    /// Free text as written by the author; never evaluated semantically.
    pub explanation: &'static str,
    pub discharged: &'static [Obligation],
}

impl SafetyArgument {
    pub const fn new(rationale: Rationale, explanation: &'static str) -> Self {
        Self {
            rationale,
            explanation,
            discharged: &[],
        }
    }

    pub const fn discharging(self, discharged: &'static [Obligation]) -> Self {
        Self { discharged, ..self }
    }

    pub fn states(&self, obligation: Obligation) -> bool {
        self.discharged.contains(&obligation)
    }
}

/// Outcome of checking an argument against its descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Valid,
    Incomplete,
    Unsound,
}

impl Classification {
    pub fn as_str(self) -> &'static str {
        match self {
            Classification::Valid => "valid",
            Classification::Incomplete => "incomplete",
            Classification::Unsound => "unsound",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable identifiers for every rule a verdict can cite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RuleId {
    PubliclyReachableScope,
    ConfinedStateEscapes,
    UnprovenNoAliasNoEscape,
    UnguardedCheckThenAct,
    ShallowImmutability,
    UnstatedObserverSafety,
    ImmutabilityNotEnforced,
    GuardBypassedViaAlias,
    UnsafeCompoundIteration,
    UnstatedReferenceFinality,
    UnclassifiedPattern,
}

impl RuleId {
    pub const ALL: [RuleId; 11] = [
        RuleId::PubliclyReachableScope,
        RuleId::ConfinedStateEscapes,
        RuleId::UnprovenNoAliasNoEscape,
        RuleId::UnguardedCheckThenAct,
        RuleId::ShallowImmutability,
        RuleId::UnstatedObserverSafety,
        RuleId::ImmutabilityNotEnforced,
        RuleId::GuardBypassedViaAlias,
        RuleId::UnsafeCompoundIteration,
        RuleId::UnstatedReferenceFinality,
        RuleId::UnclassifiedPattern,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RuleId::PubliclyReachableScope => "PubliclyReachableScope",
            RuleId::ConfinedStateEscapes => "ConfinedStateEscapes",
            RuleId::UnprovenNoAliasNoEscape => "UnprovenNoAliasNoEscape",
            RuleId::UnguardedCheckThenAct => "UnguardedCheckThenAct",
            RuleId::ShallowImmutability => "ShallowImmutability",
            RuleId::UnstatedObserverSafety => "UnstatedObserverSafety",
            RuleId::ImmutabilityNotEnforced => "ImmutabilityNotEnforced",
            RuleId::GuardBypassedViaAlias => "GuardBypassedViaAlias",
            RuleId::UnsafeCompoundIteration => "UnsafeCompoundIteration",
            RuleId::UnstatedReferenceFinality => "UnstatedReferenceFinality",
            RuleId::UnclassifiedPattern => "UnclassifiedPattern",
        }
    }

    /// Resolve a rule by its exact name.
    pub fn parse(name: &str) -> Option<RuleId> {
        RuleId::ALL.into_iter().find(|rule| rule.as_str() == name)
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict for one (descriptor, argument) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub classification: Classification,
    pub violated_rule: Option<RuleId>,
    pub explanation: String,
}
