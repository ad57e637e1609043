//! Common utilities for the ampersand crates.
//!
//! This crate provides shared infrastructure used by the automaton builder,
//! the character reference consumer, and the CLI:
//! - **Warning System** - deduplicated, colored terminal diagnostics

pub mod warning;
