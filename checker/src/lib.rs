//! Rule-based checker for thread safety arguments.
//!
//! A fixed catalog of state-sharing patterns is judged against an ordered
//! rule table drawn from confinement, immutability and synchronization
//! doctrine. The crate keeps a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (types, rule table, catalog
//!   invariants). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (config file loading).
//!
//! [`catalog`] holds the built-in patterns, [`check`] drives evaluation and
//! [`report`] renders the result.

pub mod catalog;
pub mod check;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod report;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
