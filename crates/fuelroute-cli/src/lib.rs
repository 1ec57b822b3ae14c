//! Fuelroute CLI - command line front end for the route planner.
//!
//! - config: environment configuration
//! - scenario: JSON scenario files
//! - report: text and JSON plan reports

pub mod config;
pub mod report;
pub mod scenario;

pub use config::Config;
pub use report::PlanReport;
pub use scenario::Scenario;

use anyhow::{Context, Result};
use fuelroute_core::PlanningRules;

/// Build and summarise a plan for `scenario`.
///
/// `currency` is a country code looked up in the scenario's currency table;
/// amounts stay in euro when it is `None`.
pub fn plan(
    scenario: &Scenario,
    rules: PlanningRules,
    currency: Option<&str>,
    include_routes: bool,
) -> Result<PlanReport> {
    let currency = currency
        .map(|code| scenario.currencies.get(code))
        .transpose()
        .context("resolving report currency")?;
    let model = scenario.build_model(rules)?;
    Ok(PlanReport::new(
        &model,
        scenario.aircraft.display_name(),
        currency,
        include_routes,
    ))
}
