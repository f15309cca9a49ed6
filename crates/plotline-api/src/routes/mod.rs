//! HTTP route modules.

pub mod content;
pub mod health;
