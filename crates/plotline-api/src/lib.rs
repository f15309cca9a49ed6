//! Plotline HTTP API — library surface shared by the binary and tests.

pub mod error;
pub mod routes;
pub mod state;
