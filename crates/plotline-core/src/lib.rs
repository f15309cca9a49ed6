//! Plotline Core — shared domain abstractions.
//!
//! This crate defines the content item model, the per-store write outcome
//! types, and the store traits that all other crates depend on. It contains
//! no infrastructure code.

pub mod error;
pub mod item;
pub mod outcome;
pub mod store;
