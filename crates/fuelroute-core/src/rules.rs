//! Planning rules and limits.

use crate::models::RouteMode;
use serde::{Deserialize, Serialize};

/// Largest waypoint count (home included) enumerated by default.
pub const DEFAULT_MAX_WAYPOINTS: usize = 6;

/// Configuration for building a route plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningRules {
    /// Upper bound on waypoints; special tours grow as (N-1)·N!
    pub max_waypoints: usize,
    /// Return to home at the end of the tour
    pub closed: bool,
    /// Fixed input order or full enumeration
    pub mode: RouteMode,
}

impl Default for PlanningRules {
    fn default() -> Self {
        Self {
            max_waypoints: DEFAULT_MAX_WAYPOINTS,
            closed: true,
            mode: RouteMode::Dynamic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_rules_fill_defaults() {
        let rules: PlanningRules = serde_json::from_str(r#"{"mode": "static"}"#).unwrap();
        assert_eq!(rules.mode, RouteMode::Static);
        assert_eq!(rules.max_waypoints, DEFAULT_MAX_WAYPOINTS);
        assert!(rules.closed);
    }
}
