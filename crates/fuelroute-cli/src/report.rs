//! Plan reports for terminal and JSON output.

use chrono::{DateTime, Utc};
use fuelroute_core::{
    CostSummary, Currency, RouteMode, RouteModel, RouteOrdering, NO_FEASIBLE_ROUTE,
};
use serde::Serialize;
use std::fmt;

const BASE_CURRENCY: &str = "EUR";

#[derive(Debug, Clone, Serialize)]
pub struct LegCost {
    pub from: String,
    pub to: String,
    pub cost: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShortestSummary {
    pub ordering: RouteOrdering,
    pub description: String,
    pub distance_km: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheapestSummary {
    pub ordering: RouteOrdering,
    pub description: String,
    pub cost: f64,
    pub legs: Vec<LegCost>,
}

/// One candidate tour with its distance and, in dynamic mode, its cost.
#[derive(Debug, Clone, Serialize)]
pub struct RouteLine {
    pub description: String,
    pub distance_km: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feasible: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    pub generated_at: DateTime<Utc>,
    pub mode: RouteMode,
    pub closed: bool,
    pub aircraft: String,
    pub currency: String,
    pub candidate_count: usize,
    pub shortest: ShortestSummary,
    pub cheapest: Option<CheapestSummary>,
    /// Cheapest cost, or -1 when no tour is feasible or costs were skipped
    pub cheapest_cost: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routes: Option<Vec<RouteLine>>,
}

impl PlanReport {
    /// Summarise `model`, converting euro amounts when `currency` is given.
    pub fn new(
        model: &RouteModel,
        aircraft: impl Into<String>,
        currency: Option<&Currency>,
        include_routes: bool,
    ) -> Self {
        let costs: Option<CostSummary> = model.costs().map(|costs| match currency {
            Some(currency) => costs.converted(currency),
            None => costs.clone(),
        });

        let shortest = model.shortest();
        let cheapest = costs.as_ref().and_then(|costs| {
            costs.cheapest.as_ref().map(|route| CheapestSummary {
                description: model.describe(&route.ordering),
                legs: leg_costs(model, &route.ordering, &route.leg_costs),
                ordering: route.ordering.clone(),
                cost: route.cost,
            })
        });

        let routes = include_routes.then(|| {
            model
                .candidates()
                .iter()
                .zip(model.route_distances())
                .enumerate()
                .map(|(index, (ordering, distance))| {
                    let result = costs.as_ref().map(|costs| &costs.results[index]);
                    RouteLine {
                        description: model.describe(ordering),
                        distance_km: distance.total_km,
                        cost: result.map(|r| r.cost),
                        feasible: result.map(|r| r.feasible),
                    }
                })
                .collect()
        });

        Self {
            generated_at: Utc::now(),
            mode: model.mode(),
            closed: model.closed(),
            aircraft: aircraft.into(),
            currency: currency
                .map(|c| c.code.clone())
                .unwrap_or_else(|| BASE_CURRENCY.to_string()),
            candidate_count: model.candidates().len(),
            shortest: ShortestSummary {
                ordering: shortest.ordering.clone(),
                description: model.describe(&shortest.ordering),
                distance_km: shortest.distance_km,
            },
            cheapest_cost: cheapest
                .as_ref()
                .map(|c| c.cost)
                .unwrap_or(NO_FEASIBLE_ROUTE),
            cheapest,
            routes,
        }
    }
}

impl fmt::Display for PlanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Plan: {} {} tour, aircraft {}, {} candidate(s)",
            if self.closed { "closed" } else { "open" },
            self.mode,
            self.aircraft,
            self.candidate_count
        )?;
        writeln!(
            f,
            "Shortest Route: {:.0} km\n  {}",
            self.shortest.distance_km, self.shortest.description
        )?;

        match (&self.cheapest, self.mode) {
            (Some(cheapest), _) => {
                writeln!(
                    f,
                    "Most Economic Route Cost: {:.0} {}\n  {}",
                    cheapest.cost, self.currency, cheapest.description
                )?;
                let legs: Vec<String> = cheapest
                    .legs
                    .iter()
                    .map(|leg| format!("{}>{}:{:.0}", leg.from, leg.to, leg.cost))
                    .collect();
                writeln!(f, "  {}", legs.join(", "))?;
            }
            (None, RouteMode::Dynamic) => {
                writeln!(
                    f,
                    "No valid travel path found. The aircraft's range is too short for at least one required leg."
                )?;
            }
            (None, RouteMode::Static) => {}
        }

        if let Some(routes) = &self.routes {
            writeln!(f, "All Routes:")?;
            for route in routes {
                write!(f, "  {}: {:.0} km", route.description, route.distance_km)?;
                match (route.cost, route.feasible) {
                    (_, Some(false)) => writeln!(f, " Invalid Route")?,
                    (Some(cost), _) => writeln!(f, " {:.0} {}", cost, self.currency)?,
                    (None, _) => writeln!(f)?,
                }
            }
        }
        Ok(())
    }
}

fn leg_costs(model: &RouteModel, ordering: &RouteOrdering, costs: &[f64]) -> Vec<LegCost> {
    let waypoints = model.waypoints();
    ordering
        .legs()
        .zip(costs)
        .map(|((from, to), &cost)| LegCost {
            from: waypoints[from].display_name(),
            to: waypoints[to].display_name(),
            cost,
        })
        .collect()
}
