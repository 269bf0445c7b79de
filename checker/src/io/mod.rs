//! I/O helpers for checker commands.

pub mod config;
