//! CLI configuration from environment.

use fuelroute_core::rules::{PlanningRules, DEFAULT_MAX_WAYPOINTS};
use std::env;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub max_waypoints: usize,
    /// Country code whose currency costs are reported in; euro when unset
    pub currency: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            max_waypoints: lookup("FUELROUTE_MAX_WAYPOINTS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_WAYPOINTS),
            currency: lookup("FUELROUTE_CURRENCY")
                .map(|s| s.trim().to_uppercase())
                .filter(|s| !s.is_empty()),
        }
    }

    pub fn rules(&self) -> PlanningRules {
        PlanningRules {
            max_waypoints: self.max_waypoints,
            ..PlanningRules::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_when_unset_or_malformed() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.max_waypoints, DEFAULT_MAX_WAYPOINTS);
        assert_eq!(config.currency, None);

        let config = Config::from_lookup(|key| {
            (key == "FUELROUTE_MAX_WAYPOINTS").then(|| "lots".to_string())
        });
        assert_eq!(config.max_waypoints, DEFAULT_MAX_WAYPOINTS);
    }

    #[test]
    fn reads_overrides() {
        let vars: HashMap<&str, &str> = [
            ("FUELROUTE_MAX_WAYPOINTS", "4"),
            ("FUELROUTE_CURRENCY", " us "),
        ]
        .into_iter()
        .collect();
        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.max_waypoints, 4);
        assert_eq!(config.currency.as_deref(), Some("US"));
        assert_eq!(config.rules().max_waypoints, 4);
    }
}
