//! Configuration for an Arriba Eats session
//!
//! A `Default` value plus `with_*` methods that consume and return the config.

use log::LevelFilter;
use serde::{Deserialize, Serialize};

/// Which orders a deliverer may claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DispatchPolicy {
    /// Orders become claimable as soon as they are placed: Ordered, Cooking or Cooked.
    /// Cooking is included too, not just Ordered and Cooked, so an order stays
    /// listed while it is on the stove.
    EarlyAssignment,
    /// Orders are only claimable once the restaurant has finished cooking them
    CookedOnly,
}

impl Default for DispatchPolicy {
    fn default() -> Self {
        DispatchPolicy::EarlyAssignment
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Name printed in the welcome and goodbye messages
    pub app_name: String,
    /// Default log level; `RUST_LOG` overrides it
    pub log_level: LevelFilter,
    /// Which orders show up in the deliverer's list
    pub dispatch_policy: DispatchPolicy,
}

impl AppConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self {
            app_name: "Arriba Eats".to_string(),
            log_level: LevelFilter::Warn,
            dispatch_policy: DispatchPolicy::default(),
        }
    }

    pub fn with_app_name(mut self, name: &str) -> Self {
        self.app_name = name.to_string();
        self
    }

    pub fn with_log_level(mut self, level: LevelFilter) -> Self {
        self.log_level = level;
        self
    }

    /// Set the policy deciding when orders become deliverable
    pub fn with_dispatch_policy(mut self, policy: DispatchPolicy) -> Self {
        self.dispatch_policy = policy;
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}
