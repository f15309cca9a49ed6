//! Consistency policy resolution.
//!
//! The policy governs what happens when the secondary write fails after the
//! primary write succeeded. It is a property of the deployment, not of the
//! content item: strict deployments prefer detectable, immediate consistency
//! (roll the primary back); others prefer keeping the user's primary data
//! and living with a reported divergence of the query index.

/// What to do when the secondary write fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsistencyPolicy {
    /// Secondary failure triggers rollback of the primary write.
    Required,
    /// Secondary failure is recorded; the primary write is retained.
    BestEffort,
}

/// Runtime configuration for the dual-store path. Built once by the caller
/// from its environment and passed in explicitly; business logic never
/// reads process environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DualStoreConfig {
    /// When true, secondary failures roll back the primary write.
    pub strict_consistency: bool,
}

/// Resolves the consistency policy from configuration. Pure; no I/O. The
/// coordinator re-resolves on every call rather than caching a verdict.
#[derive(Debug, Clone, Copy)]
pub struct PolicyResolver {
    config: DualStoreConfig,
}

impl PolicyResolver {
    /// Create a resolver over the given configuration.
    #[must_use]
    pub fn new(config: DualStoreConfig) -> Self {
        Self { config }
    }

    /// The policy in effect for the current call.
    #[must_use]
    pub fn resolve(&self) -> ConsistencyPolicy {
        if self.config.strict_consistency {
            ConsistencyPolicy::Required
        } else {
            ConsistencyPolicy::BestEffort
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_config_resolves_to_required() {
        let resolver = PolicyResolver::new(DualStoreConfig {
            strict_consistency: true,
        });

        assert_eq!(resolver.resolve(), ConsistencyPolicy::Required);
    }

    #[test]
    fn test_lenient_config_resolves_to_best_effort() {
        let resolver = PolicyResolver::new(DualStoreConfig {
            strict_consistency: false,
        });

        assert_eq!(resolver.resolve(), ConsistencyPolicy::BestEffort);
    }

    #[test]
    fn test_resolution_is_stable_across_calls() {
        let resolver = PolicyResolver::new(DualStoreConfig {
            strict_consistency: true,
        });

        assert_eq!(resolver.resolve(), resolver.resolve());
    }
}
