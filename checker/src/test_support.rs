//! Test-only helpers for constructing descriptors and arguments.

use crate::core::types::{
    Contents, Guard, Mutability, OwnerScope, Rationale, SafetyArgument, SharedStateDescriptor,
    Traversal,
};

pub const OWNER_SCOPES: [OwnerScope; 3] = [
    OwnerScope::ClassStatic,
    OwnerScope::InstanceField,
    OwnerScope::LocalVariable,
];

pub const MUTABILITIES: [Mutability; 3] = [
    Mutability::MutableReference,
    Mutability::FinalReference,
    Mutability::DeeplyImmutable,
];

pub const GUARDS: [Guard; 4] = [
    Guard::None,
    Guard::SynchronizedWrapper,
    Guard::Lock,
    Guard::ConfinementOnly,
];

pub const CONTENTS: [Contents; 3] = [Contents::Mutable, Contents::ReadOnlyView, Contents::Immutable];

pub const TRAVERSALS: [Traversal; 3] = [Traversal::None, Traversal::Unlocked, Traversal::HeldLock];

pub const RATIONALES: [Rationale; 4] = [
    Rationale::Confinement,
    Rationale::Immutability,
    Rationale::ThreadsafeGuard,
    Rationale::SingletonInvariant,
];

/// Descriptor with the conservative defaults of [`SharedStateDescriptor::new`].
pub fn descriptor(owner_scope: OwnerScope, mutability: Mutability) -> SharedStateDescriptor {
    SharedStateDescriptor::new(owner_scope, mutability)
}

/// Argument with a placeholder explanation and nothing discharged.
pub fn argument(rationale: Rationale) -> SafetyArgument {
    SafetyArgument::new(rationale, "stated argument")
}

/// Every descriptor the fact vocabulary can express.
pub fn all_descriptors() -> Vec<SharedStateDescriptor> {
    let mut output = Vec::new();
    for owner_scope in OWNER_SCOPES {
        for mutability in MUTABILITIES {
            for guard in GUARDS {
                for contents in CONTENTS {
                    for traversal in TRAVERSALS {
                        for escapes in [false, true] {
                            for lazy_initialization in [false, true] {
                                output.push(SharedStateDescriptor {
                                    owner_scope,
                                    mutability,
                                    guard,
                                    escapes,
                                    lazy_initialization,
                                    contents,
                                    traversal,
                                });
                            }
                        }
                    }
                }
            }
        }
    }
    output
}
