pub mod aircraft;
pub mod cost;
pub mod error;
pub mod evaluator;
pub mod models;
pub mod permutations;
pub mod pricing;
pub mod route_model;
pub mod rules;
pub mod spatial;

pub use aircraft::{AircraftCatalog, AircraftProfile, AircraftSpec, UnitSystem};
pub use cost::{simulate, CheapestRoute, CostResult, CostSummary, NO_FEASIBLE_ROUTE};
pub use error::{RouteError, RouteResult};
pub use evaluator::{evaluate, DistanceResult, ShortestRoute};
pub use models::{RouteMode, RouteOrdering, Waypoint};
pub use permutations::{
    add_home, normal_permutations, remove_adjacent_duplicates, special_permutations,
    CandidateSet, Permutations, HOME_INDEX,
};
pub use pricing::{Currency, CurrencyTable, FuelPrice, FuelPriceTable};
pub use route_model::{RouteModel, RouteModelBuilder};
pub use rules::PlanningRules;
pub use spatial::{distance_km, great_circle_distance, DistanceMatrix, EARTH_RADIUS_KM};
