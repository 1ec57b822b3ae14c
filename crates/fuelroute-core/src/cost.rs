//! Fuel cost simulation over candidate tours.
//!
//! Each tour is walked leg by leg:
//!
//! 1. the aircraft fills its tank at home before the first leg
//! 2. a leg longer than the aircraft's range makes the whole tour infeasible
//! 3. fuel burned on a leg is paid for at the destination country's price
//! 4. a feasible tour is refunded the fuel left over after the final leg
//!
//! The refund in step 4 takes only the *last* leg's burn off a full tank. It
//! is not a running tank simulation, so multi-leg tours are under-modelled.

use crate::aircraft::AircraftProfile;
use crate::error::{RouteError, RouteResult};
use crate::models::{RouteOrdering, Waypoint};
use crate::pricing::{Currency, FuelPriceTable};
use crate::spatial::DistanceMatrix;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Reported as the cheapest cost when no tour is feasible.
pub const NO_FEASIBLE_ROUTE: f64 = -1.0;

/// Cost of a single tour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostResult {
    /// Total cost; 0 when a leg exceeds the aircraft's range
    pub cost: f64,
    /// Cost of each leg; `[0]` for an infeasible tour
    pub leg_costs: Vec<f64>,
    /// Full tank bought at home before departure
    pub initial_fuel_cost: f64,
    /// Value of fuel left after the final leg
    pub refund: f64,
    /// False when some leg is longer than the aircraft's range
    pub feasible: bool,
}

impl CostResult {
    fn infeasible() -> Self {
        Self {
            cost: 0.0,
            leg_costs: vec![0.0],
            initial_fuel_cost: 0.0,
            refund: 0.0,
            feasible: false,
        }
    }

    /// Whether this tour may be chosen as the cheapest.
    pub fn is_candidate(&self) -> bool {
        self.feasible && self.cost > 0.0
    }

    fn converted(&self, currency: &Currency) -> Self {
        Self {
            cost: currency.convert_from_euro(self.cost),
            leg_costs: self
                .leg_costs
                .iter()
                .map(|&leg| currency.convert_from_euro(leg))
                .collect(),
            initial_fuel_cost: currency.convert_from_euro(self.initial_fuel_cost),
            refund: currency.convert_from_euro(self.refund),
            feasible: self.feasible,
        }
    }
}

/// The cheapest feasible tour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheapestRoute {
    pub index: usize,
    pub ordering: RouteOrdering,
    pub cost: f64,
    pub leg_costs: Vec<f64>,
}

/// Costs of every candidate plus the cheapest feasible one, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostSummary {
    pub results: Vec<CostResult>,
    pub cheapest: Option<CheapestRoute>,
}

impl CostSummary {
    /// Cheapest cost, or [`NO_FEASIBLE_ROUTE`].
    pub fn cheapest_cost(&self) -> f64 {
        self.cheapest
            .as_ref()
            .map(|route| route.cost)
            .unwrap_or(NO_FEASIBLE_ROUTE)
    }

    /// Per-leg costs of the cheapest tour; empty when none is feasible.
    pub fn cheapest_leg_costs(&self) -> &[f64] {
        self.cheapest
            .as_ref()
            .map(|route| route.leg_costs.as_slice())
            .unwrap_or(&[])
    }

    /// Cheapest ordering; empty when none is feasible.
    pub fn cheapest_ordering(&self) -> &[usize] {
        self.cheapest
            .as_ref()
            .map(|route| route.ordering.indices())
            .unwrap_or(&[])
    }

    pub fn feasible_count(&self) -> usize {
        self.results.iter().filter(|r| r.feasible).count()
    }

    /// Re-express every amount in `currency` (prices are in euro).
    pub fn converted(&self, currency: &Currency) -> Self {
        Self {
            results: self.results.iter().map(|r| r.converted(currency)).collect(),
            cheapest: self.cheapest.as_ref().map(|route| CheapestRoute {
                cost: currency.convert_from_euro(route.cost),
                leg_costs: route
                    .leg_costs
                    .iter()
                    .map(|&leg| currency.convert_from_euro(leg))
                    .collect(),
                ..route.clone()
            }),
        }
    }
}

/// Cost every ordering and find the cheapest feasible one.
pub fn simulate(
    orderings: &[RouteOrdering],
    waypoints: &[Waypoint],
    aircraft: &AircraftProfile,
    prices: &FuelPriceTable,
) -> RouteResult<CostSummary> {
    simulate_with_matrix(
        orderings,
        waypoints,
        &DistanceMatrix::build(waypoints),
        aircraft,
        prices,
    )
}

/// As [`simulate`], reading leg distances from a precomputed matrix.
pub fn simulate_with_matrix(
    orderings: &[RouteOrdering],
    waypoints: &[Waypoint],
    matrix: &DistanceMatrix,
    aircraft: &AircraftProfile,
    prices: &FuelPriceTable,
) -> RouteResult<CostSummary> {
    if orderings.is_empty() {
        return Err(RouteError::EmptyCandidateSet);
    }
    check_prices(orderings, waypoints, prices)?;

    let mut results = Vec::with_capacity(orderings.len());
    let mut cheapest: Option<(usize, f64)> = None;

    for (index, ordering) in orderings.iter().enumerate() {
        let result = simulate_route(ordering, waypoints, matrix, aircraft, prices)?;
        if result.is_candidate() {
            match cheapest {
                Some((_, best)) if result.cost >= best => {}
                _ => cheapest = Some((index, result.cost)),
            }
        }
        results.push(result);
    }

    let cheapest = cheapest.map(|(index, cost)| CheapestRoute {
        index,
        ordering: orderings[index].clone(),
        cost,
        leg_costs: results[index].leg_costs.clone(),
    });

    match &cheapest {
        Some(route) => tracing::info!(
            index = route.index,
            cost = route.cost,
            "cheapest feasible tour selected"
        ),
        None => tracing::warn!(
            candidates = orderings.len(),
            range_km = aircraft.max_range_km(),
            "no feasible tour within aircraft range"
        ),
    }

    Ok(CostSummary { results, cheapest })
}

/// Every country a tour could land in must be priced before any tour is walked.
fn check_prices(
    orderings: &[RouteOrdering],
    waypoints: &[Waypoint],
    prices: &FuelPriceTable,
) -> RouteResult<()> {
    let visited: BTreeSet<usize> = orderings
        .iter()
        .flat_map(|ordering| ordering.indices().iter().copied())
        .collect();
    for index in visited {
        let waypoint = waypoint_at(waypoints, index)?;
        prices.price(&waypoint.country_iso)?;
    }
    Ok(())
}

fn waypoint_at(waypoints: &[Waypoint], index: usize) -> RouteResult<&Waypoint> {
    waypoints.get(index).ok_or(RouteError::IndexOutOfBounds {
        index,
        len: waypoints.len(),
    })
}

fn simulate_route(
    ordering: &RouteOrdering,
    waypoints: &[Waypoint],
    matrix: &DistanceMatrix,
    aircraft: &AircraftProfile,
    prices: &FuelPriceTable,
) -> RouteResult<CostResult> {
    let mut cost = 0.0;
    let mut initial_fuel_cost = 0.0;
    let mut leg_costs = Vec::with_capacity(ordering.leg_count());
    let mut last_leg: Option<(&Waypoint, f64)> = None;

    for (leg, (from, to)) in ordering.legs().enumerate() {
        let origin = waypoint_at(waypoints, from)?;
        let destination = waypoint_at(waypoints, to)?;

        if leg == 0 {
            initial_fuel_cost = prices.price(&origin.country_iso)? * aircraft.fuel_capacity_l();
            cost += initial_fuel_cost;
        }

        let distance_km = matrix.get(from, to)?;
        if !aircraft.in_range(distance_km) {
            tracing::debug!(
                leg,
                from,
                to,
                distance_km,
                range_km = aircraft.max_range_km(),
                "tour infeasible: leg exceeds range"
            );
            return Ok(CostResult::infeasible());
        }

        let fuel_consumed = aircraft.fuel_for(distance_km);
        let leg_cost = fuel_consumed * prices.price(&destination.country_iso)?;
        leg_costs.push(leg_cost);
        cost += leg_cost;
        last_leg = Some((destination, fuel_consumed));
    }

    let mut refund = 0.0;
    if cost > 0.0 {
        if let Some((destination, fuel_consumed)) = last_leg {
            let remaining_fuel = aircraft.fuel_capacity_l() - fuel_consumed;
            refund = remaining_fuel * prices.price(&destination.country_iso)?;
            cost -= refund;
        }
    }

    Ok(CostResult {
        cost,
        leg_costs,
        initial_fuel_cost,
        refund,
        feasible: true,
    })
}
