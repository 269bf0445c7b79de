//! Stable exit codes for checker CLI commands.

/// Command succeeded. `checker check` exits with this whatever the verdicts.
pub const OK: i32 = 0;
/// Command failed: bad config, unknown pattern or rule, or a catalog that
/// violates its invariants.
pub const INVALID: i32 = 1;
