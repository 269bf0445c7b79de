//! Deterministic, pure logic for judging thread safety arguments.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data and return deterministic outputs suitable for tests.

pub mod invariants;
pub mod rules;
pub mod types;
