//! Planning scenarios loaded from JSON.

use anyhow::{Context, Result};
use fuelroute_core::{
    AircraftSpec, CurrencyTable, FuelPriceTable, PlanningRules, RouteMode, RouteModel, Waypoint,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything needed to build one route plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// First entry is home
    pub waypoints: Vec<Waypoint>,
    pub aircraft: AircraftSpec,
    pub fuel_prices: FuelPriceTable,
    #[serde(default)]
    pub currencies: CurrencyTable,
    #[serde(default)]
    pub mode: Option<RouteMode>,
    #[serde(default)]
    pub closed: Option<bool>,
}

impl Scenario {
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("parsing scenario {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Apply the scenario's own mode/closed settings on top of `base`.
    pub fn rules(&self, base: PlanningRules) -> PlanningRules {
        PlanningRules {
            mode: self.mode.unwrap_or(base.mode),
            closed: self.closed.unwrap_or(base.closed),
            ..base
        }
    }

    pub fn build_model(&self, rules: PlanningRules) -> Result<RouteModel> {
        let aircraft = self
            .aircraft
            .profile()
            .with_context(|| format!("aircraft {}", self.aircraft.display_name()))?;
        let model = RouteModel::builder(self.waypoints.clone(), aircraft, self.fuel_prices.clone())
            .rules(rules)
            .build()
            .context("building route plan")?;
        Ok(model)
    }
}
