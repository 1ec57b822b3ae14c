//! Error taxonomy for route planning.

use thiserror::Error;

/// Precondition failures raised while building or evaluating a route plan.
///
/// Range-exceeded legs are not errors: they surface as infeasible
/// [`CostResult`](crate::cost::CostResult) values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouteError {
    #[error("invalid point: latitude {lat}, longitude {lon}")]
    InvalidPoint { lat: f64, lon: f64 },
    #[error("no candidate routes to evaluate")]
    EmptyCandidateSet,
    #[error("no fuel price for country '{country}'")]
    MissingPrice { country: String },
    #[error("{count} waypoints exceeds the enumeration limit of {max}")]
    TooManyWaypoints { count: usize, max: usize },
    #[error("aircraft code '{code}' unknown")]
    UnknownAircraft { code: String },
    #[error("no currency for country '{country}'")]
    UnknownCurrency { country: String },
    #[error("currency code '{code}' must be 3 letters")]
    InvalidCurrencyCode { code: String },
    #[error("invalid aircraft: {0}")]
    InvalidAircraft(String),
    #[error("waypoint index {index} out of bounds for {len} waypoints")]
    IndexOutOfBounds { index: usize, len: usize },
}

pub type RouteResult<T> = Result<T, RouteError>;
