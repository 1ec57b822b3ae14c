//! Route plan orchestration.
//!
//! A [`RouteModel`] is built once from a snapshot of waypoints, aircraft and
//! fuel prices. Every derived collection is computed during construction and
//! the model is read-only afterwards; a new request builds a new model.

use crate::aircraft::AircraftProfile;
use crate::cost::{self, CheapestRoute, CostSummary, NO_FEASIBLE_ROUTE};
use crate::error::{RouteError, RouteResult};
use crate::evaluator::{self, DistanceResult, ShortestRoute};
use crate::models::{RouteMode, RouteOrdering, Waypoint};
use crate::permutations::CandidateSet;
use crate::pricing::FuelPriceTable;
use crate::rules::PlanningRules;
use crate::spatial::DistanceMatrix;

/// Builder for [`RouteModel`]; construction either fully succeeds or fails.
#[derive(Debug, Clone)]
pub struct RouteModelBuilder {
    waypoints: Vec<Waypoint>,
    aircraft: AircraftProfile,
    prices: FuelPriceTable,
    rules: PlanningRules,
}

impl RouteModelBuilder {
    pub fn rules(mut self, rules: PlanningRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn mode(mut self, mode: RouteMode) -> Self {
        self.rules.mode = mode;
        self
    }

    pub fn closed(mut self, closed: bool) -> Self {
        self.rules.closed = closed;
        self
    }

    pub fn max_waypoints(mut self, max_waypoints: usize) -> Self {
        self.rules.max_waypoints = max_waypoints;
        self
    }

    pub fn build(self) -> RouteResult<RouteModel> {
        let Self {
            waypoints,
            aircraft,
            prices,
            rules,
        } = self;

        if waypoints.is_empty() {
            return Err(RouteError::EmptyCandidateSet);
        }
        for waypoint in &waypoints {
            waypoint.validate()?;
        }

        let (candidates, distance_matrix, distances, costs) = match rules.mode {
            RouteMode::Dynamic => {
                if waypoints.len() > rules.max_waypoints {
                    return Err(RouteError::TooManyWaypoints {
                        count: waypoints.len(),
                        max: rules.max_waypoints,
                    });
                }
                let candidates = CandidateSet::dynamic(waypoints.len(), rules.closed)?;
                let matrix = DistanceMatrix::build(&waypoints);
                let distances = evaluator::evaluate_with_matrix(candidates.orderings(), &matrix)?;
                let costs = cost::simulate_with_matrix(
                    candidates.orderings(),
                    &waypoints,
                    &matrix,
                    &aircraft,
                    &prices,
                )?;
                (candidates, Some(matrix), distances, Some(costs))
            }
            RouteMode::Static => {
                let candidates = CandidateSet::fixed(waypoints.len(), rules.closed)?;
                let distances = evaluator::evaluate(candidates.orderings(), &waypoints)?;
                (candidates, None, distances, None)
            }
        };

        let shortest = evaluator::shortest(candidates.orderings(), &distances)?;
        tracing::info!(
            mode = %rules.mode,
            candidates = candidates.len(),
            shortest_index = shortest.index,
            distance_km = shortest.distance_km,
            "route plan built"
        );

        Ok(RouteModel {
            waypoints,
            aircraft,
            prices,
            rules,
            candidates,
            distance_matrix,
            distances,
            shortest,
            costs,
        })
    }
}

/// An evaluated route plan.
#[derive(Debug, Clone)]
pub struct RouteModel {
    waypoints: Vec<Waypoint>,
    aircraft: AircraftProfile,
    prices: FuelPriceTable,
    rules: PlanningRules,
    candidates: CandidateSet,
    distance_matrix: Option<DistanceMatrix>,
    distances: Vec<DistanceResult>,
    shortest: ShortestRoute,
    costs: Option<CostSummary>,
}

impl RouteModel {
    /// Start a plan with default [`PlanningRules`] (dynamic, closed).
    pub fn builder(
        waypoints: Vec<Waypoint>,
        aircraft: AircraftProfile,
        prices: FuelPriceTable,
    ) -> RouteModelBuilder {
        RouteModelBuilder {
            waypoints,
            aircraft,
            prices,
            rules: PlanningRules::default(),
        }
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn aircraft(&self) -> &AircraftProfile {
        &self.aircraft
    }

    pub fn fuel_prices(&self) -> &FuelPriceTable {
        &self.prices
    }

    pub fn mode(&self) -> RouteMode {
        self.rules.mode
    }

    pub fn closed(&self) -> bool {
        self.rules.closed
    }

    pub fn candidate_set(&self) -> &CandidateSet {
        &self.candidates
    }

    /// Every candidate ordering, normal tours first.
    pub fn candidates(&self) -> &[RouteOrdering] {
        self.candidates.orderings()
    }

    /// Pairwise distances; only built in dynamic mode.
    pub fn distance_matrix(&self) -> Option<&DistanceMatrix> {
        self.distance_matrix.as_ref()
    }

    /// Distance of each candidate, aligned with [`candidates`](Self::candidates).
    pub fn route_distances(&self) -> &[DistanceResult] {
        &self.distances
    }

    pub fn shortest(&self) -> &ShortestRoute {
        &self.shortest
    }

    pub fn shortest_ordering(&self) -> &RouteOrdering {
        &self.shortest.ordering
    }

    pub fn shortest_distance_km(&self) -> f64 {
        self.shortest.distance_km
    }

    /// Cost of each candidate; `None` in static mode.
    pub fn costs(&self) -> Option<&CostSummary> {
        self.costs.as_ref()
    }

    pub fn cheapest(&self) -> Option<&CheapestRoute> {
        self.costs.as_ref().and_then(|costs| costs.cheapest.as_ref())
    }

    /// Cheapest cost in euro, or [`NO_FEASIBLE_ROUTE`] when no tour is
    /// feasible or costs were not computed.
    pub fn cheapest_cost(&self) -> f64 {
        self.costs
            .as_ref()
            .map(CostSummary::cheapest_cost)
            .unwrap_or(NO_FEASIBLE_ROUTE)
    }

    /// Cheapest ordering; empty when there is none.
    pub fn cheapest_ordering(&self) -> &[usize] {
        self.costs
            .as_ref()
            .map(CostSummary::cheapest_ordering)
            .unwrap_or(&[])
    }

    /// Per-leg costs of the cheapest ordering; empty when there is none.
    pub fn cheapest_leg_costs(&self) -> &[f64] {
        self.costs
            .as_ref()
            .map(CostSummary::cheapest_leg_costs)
            .unwrap_or(&[])
    }

    /// Waypoints visited by `ordering`, in order.
    pub fn map_points(&self, ordering: &RouteOrdering) -> RouteResult<Vec<&Waypoint>> {
        ordering.map_points(&self.waypoints)
    }

    /// `DUB>JFK>DUB` style description of `ordering`.
    pub fn describe(&self, ordering: &RouteOrdering) -> String {
        ordering.describe(&self.waypoints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::FuelPrice;

    fn waypoints() -> Vec<Waypoint> {
        vec![
            Waypoint::new(53.42, -6.27, "IE").unwrap().with_label("DUB"),
            Waypoint::new(51.47, -0.45, "GB").unwrap().with_label("LHR"),
            Waypoint::new(49.01, 2.55, "FR").unwrap().with_label("CDG"),
            Waypoint::new(50.03, 8.56, "DE").unwrap().with_label("FRA"),
        ]
    }

    fn prices() -> FuelPriceTable {
        ["IE", "GB", "FR", "DE"]
            .into_iter()
            .map(|iso| FuelPrice {
                country: String::new(),
                iso_country: iso.into(),
                price: 0.5,
            })
            .collect()
    }

    fn aircraft() -> AircraftProfile {
        AircraftProfile::new(3_000.0, 20_000.0).unwrap()
    }

    #[test]
    fn dynamic_plan_computes_everything() {
        let model = RouteModel::builder(waypoints(), aircraft(), prices())
            .build()
            .unwrap();
        assert_eq!(model.mode(), RouteMode::Dynamic);
        assert_eq!(model.candidates().len(), model.route_distances().len());
        assert_eq!(model.candidate_set().normal().len(), 6);
        assert!(model.distance_matrix().is_some());

        let costs = model.costs().unwrap();
        assert_eq!(costs.results.len(), model.candidates().len());
        assert!(model.cheapest().is_some());
        assert!(model.cheapest_cost() > 0.0);
        assert_eq!(
            model.cheapest_leg_costs().len(),
            model.cheapest_ordering().len() - 1
        );
    }

    #[test]
    fn static_plan_skips_costs() {
        let model = RouteModel::builder(waypoints(), aircraft(), prices())
            .mode(RouteMode::Static)
            .build()
            .unwrap();
        assert_eq!(model.candidates(), &[RouteOrdering::new(vec![0, 1, 2, 3, 0])]);
        assert!(model.costs().is_none());
        assert!(model.distance_matrix().is_none());
        assert_eq!(model.cheapest_cost(), NO_FEASIBLE_ROUTE);
        assert!(model.cheapest_ordering().is_empty());
        assert_eq!(model.describe(model.shortest_ordering()), "DUB>LHR>CDG>FRA>DUB");
    }

    #[test]
    fn open_static_plan_does_not_return_home() {
        let model = RouteModel::builder(waypoints(), aircraft(), prices())
            .mode(RouteMode::Static)
            .closed(false)
            .build()
            .unwrap();
        assert_eq!(model.shortest_ordering().indices(), &[0, 1, 2, 3]);
        assert_eq!(model.map_points(model.shortest_ordering()).unwrap().len(), 4);
    }

    #[test]
    fn construction_fails_atomically() {
        assert_eq!(
            RouteModel::builder(Vec::new(), aircraft(), prices())
                .build()
                .unwrap_err(),
            RouteError::EmptyCandidateSet
        );

        let mut bad = waypoints();
        bad[2].lat = 123.0;
        assert!(matches!(
            RouteModel::builder(bad, aircraft(), prices()).build(),
            Err(RouteError::InvalidPoint { .. })
        ));

        assert_eq!(
            RouteModel::builder(waypoints(), aircraft(), prices())
                .max_waypoints(3)
                .build()
                .unwrap_err(),
            RouteError::TooManyWaypoints { count: 4, max: 3 }
        );

        let mut unpriced = waypoints();
        unpriced[3].country_iso = "CH".into();
        assert_eq!(
            RouteModel::builder(unpriced, aircraft(), prices())
                .build()
                .unwrap_err(),
            RouteError::MissingPrice { country: "CH".into() }
        );
    }

    #[test]
    fn open_tours_with_non_positive_cost_are_never_cheapest() {
        // Cheap fuel at home, dear fuel abroad: the refund at the last stop
        // outweighs everything paid on the way.
        let waypoints = waypoints()[..3].to_vec();
        let prices: FuelPriceTable = [("IE", 0.3), ("GB", 0.9), ("FR", 0.9)]
            .into_iter()
            .map(|(iso, price)| FuelPrice {
                country: String::new(),
                iso_country: iso.into(),
                price,
            })
            .collect();
        let model = RouteModel::builder(waypoints, aircraft(), prices)
            .closed(false)
            .build()
            .unwrap();

        assert_eq!(model.candidates()[0], RouteOrdering::new(vec![0, 1, 2]));
        let costs = model.costs().unwrap();
        assert_eq!(costs.feasible_count(), model.candidates().len());
        assert!(costs.results.iter().all(|r| r.feasible && r.cost < 0.0));
        assert!(model.cheapest().is_none());
        assert_eq!(model.cheapest_cost(), NO_FEASIBLE_ROUTE);
        assert!(model.cheapest_leg_costs().is_empty());
    }

    #[test]
    fn static_plans_ignore_the_enumeration_bound() {
        let model = RouteModel::builder(waypoints(), aircraft(), prices())
            .mode(RouteMode::Static)
            .max_waypoints(2)
            .build();
        assert!(model.is_ok());
    }

    #[test]
    fn model_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RouteModel>();
    }
}
