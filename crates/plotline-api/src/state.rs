//! Shared application state.

use plotline_dualstore::DualStoreCoordinator;

/// Application state shared across all request handlers. The coordinator
/// holds the store clients; it is constructed once at startup and reused
/// for every request.
#[derive(Clone)]
pub struct AppState {
    /// The dual-store write coordinator.
    pub coordinator: DualStoreCoordinator,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(coordinator: DualStoreCoordinator) -> Self {
        Self { coordinator }
    }
}
