//! Qualification matching for candidate profiles.
//!
//! The [`matching`] module holds the rule evaluation engine: fact values, constraints,
//! positions, the inference engine and its trace. Everything else in the crate wraps that
//! core for intake, export and serving.

pub mod config;
pub mod error;
pub mod matching;
pub mod telemetry;
