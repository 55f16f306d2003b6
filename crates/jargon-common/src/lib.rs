//! Common utilities for the jargon selector engine.
//!
//! This crate provides shared infrastructure used by the other crates:
//! - **Warning System** - deduplicated, colored stderr output for selectors
//!   the engine rejects

pub mod warning;
