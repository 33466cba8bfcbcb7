use crate::errors::ServiceError;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::info;

/// Well-known flag names, one per mutating surface.
pub mod flags {
    pub const CUSTOMERS_WRITE: &str = "customers_write";
    pub const PLANS_WRITE: &str = "plans_write";
    pub const MEMBERSHIPS_WRITE: &str = "memberships_write";
    pub const TRANSACTIONS_WRITE: &str = "transactions_write";
}

/// Runtime-reloadable feature gate. Flags default to enabled; only flags
/// explicitly disabled (at startup or via `set`) reject operations.
#[derive(Clone, Default)]
pub struct FeatureFlags {
    flags: Arc<DashMap<String, bool>>,
}

impl FeatureFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the gate from a comma-separated list of disabled flag names.
    pub fn from_disabled_list(disabled: Option<&str>) -> Self {
        let gate = Self::new();
        if let Some(list) = disabled {
            for name in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                info!(flag = name, "feature disabled at startup");
                gate.set(name, false);
            }
        }
        gate
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.flags.get(name).map(|v| *v).unwrap_or(true)
    }

    pub fn set(&self, name: &str, enabled: bool) {
        self.flags.insert(name.to_string(), enabled);
    }

    /// Rejects the operation when the named flag is disabled.
    pub fn require(&self, name: &str) -> Result<(), ServiceError> {
        if self.is_enabled(name) {
            Ok(())
        } else {
            Err(ServiceError::FeatureDisabled(format!(
                "Operation '{}' is disabled",
                name
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn unknown_flags_default_to_enabled() {
        let gate = FeatureFlags::new();
        assert!(gate.is_enabled("anything"));
        assert!(gate.require(flags::CUSTOMERS_WRITE).is_ok());
    }

    #[test]
    fn disabled_list_is_parsed() {
        let gate = FeatureFlags::from_disabled_list(Some("plans_write, transactions_write"));
        assert!(!gate.is_enabled(flags::PLANS_WRITE));
        assert!(!gate.is_enabled(flags::TRANSACTIONS_WRITE));
        assert!(gate.is_enabled(flags::CUSTOMERS_WRITE));
    }

    #[test]
    fn flags_can_be_flipped_at_runtime() {
        let gate = FeatureFlags::new();
        gate.set(flags::CUSTOMERS_WRITE, false);
        assert_matches!(
            gate.require(flags::CUSTOMERS_WRITE),
            Err(ServiceError::FeatureDisabled(_))
        );
        gate.set(flags::CUSTOMERS_WRITE, true);
        assert!(gate.require(flags::CUSTOMERS_WRITE).is_ok());
    }
}
