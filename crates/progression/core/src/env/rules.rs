use crate::config::RulesConfig;

/// Read-only access to the versioned rules table.
pub trait RulesOracle: Send + Sync {
    fn rules(&self) -> &RulesConfig;
}

impl RulesOracle for RulesConfig {
    fn rules(&self) -> &RulesConfig {
        self
    }
}
