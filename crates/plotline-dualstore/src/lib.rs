//! Plotline — dual-store write coordinator.
//!
//! Persists a single logical content item into two independently-failing
//! backends: the relational system of record (primary) and a per-type query
//! store (secondary). There is no shared transaction; the coordinator gives
//! callers one honest verdict and a configured consistency policy for
//! partial failure.

pub mod adapter;
pub mod coordinator;
pub mod policy;
pub mod result;
pub mod router;

pub use adapter::SecondaryStoreAdapter;
pub use coordinator::{DualStoreCoordinator, DualStoreError};
pub use policy::{ConsistencyPolicy, DualStoreConfig, PolicyResolver};
pub use result::{DualStorageResult, SecondaryWriteOutcome};
