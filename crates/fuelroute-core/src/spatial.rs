//! Great-circle distance math.

use crate::error::{RouteError, RouteResult};
use crate::models::{RouteOrdering, Waypoint};
use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Decimal places the cosine-law argument is rounded to before `acos`.
const COSINE_ROUND_DECIMALS: i32 = 12;

/// Calculate distance between two points in kilometres using the spherical
/// law of cosines.
///
/// # Arguments
/// * `lat1`, `lon1` - First point coordinates in decimal degrees
/// * `lat2`, `lon2` - Second point coordinates in decimal degrees
///
/// # Returns
/// Distance in kilometres
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    // Colatitudes
    let phi1 = (90.0 - lat1).to_radians();
    let phi2 = (90.0 - lat2).to_radians();
    let dtheta = (lon1 - lon2).to_radians();

    let cosine = phi1.sin() * phi2.sin() * dtheta.cos() + phi1.cos() * phi2.cos();
    // Float error can push the argument to e.g. 1.0000000000001.
    let cosine = round_to(cosine, COSINE_ROUND_DECIMALS).clamp(-1.0, 1.0);

    cosine.acos() * EARTH_RADIUS_KM
}

/// Distance between two waypoints in kilometres.
pub fn great_circle_distance(from: &Waypoint, to: &Waypoint) -> f64 {
    distance_km(from.lat, from.lon, to.lat, to.lon)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Pairwise distances between every waypoint of a plan, computed once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceMatrix {
    distances: Vec<Vec<f64>>,
}

impl DistanceMatrix {
    pub fn build(waypoints: &[Waypoint]) -> Self {
        let distances = waypoints
            .iter()
            .map(|from| {
                waypoints
                    .iter()
                    .map(|to| great_circle_distance(from, to))
                    .collect()
            })
            .collect();
        Self { distances }
    }

    /// Number of waypoints along one side.
    pub fn size(&self) -> usize {
        self.distances.len()
    }

    pub fn get(&self, from: usize, to: usize) -> RouteResult<f64> {
        let len = self.size();
        self.distances
            .get(from)
            .and_then(|row| row.get(to))
            .copied()
            .ok_or(RouteError::IndexOutOfBounds {
                index: from.max(to),
                len,
            })
    }

    /// Sum of consecutive leg distances along `ordering`.
    pub fn tour_length(&self, ordering: &RouteOrdering) -> RouteResult<f64> {
        ordering
            .legs()
            .try_fold(0.0, |total, (from, to)| Ok(total + self.get(from, to)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dublin_to_jfk_known_distance() {
        let dist = distance_km(53.42, -6.27, 40.64, -73.78);
        assert!((dist - 5103.0).abs() < 1.0, "got {dist}");
    }

    #[test]
    fn same_point_is_zero() {
        let dist = distance_km(33.6846, -117.8265, 33.6846, -117.8265);
        assert_eq!(dist, 0.0);
        assert_eq!(distance_km(-89.99, 179.0, -89.99, 179.0), 0.0);
        // sin²+cos² of this colatitude evaluates to 1.0000000000000002
        assert_eq!(distance_km(-65.8144, 125.0761, -65.8144, 125.0761), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let points = [(53.42, -6.27), (40.64, -73.78), (-33.95, 151.18), (35.69, 51.31)];
        for &(lat1, lon1) in &points {
            for &(lat2, lon2) in &points {
                let there = distance_km(lat1, lon1, lat2, lon2);
                let back = distance_km(lat2, lon2, lat1, lon1);
                assert!((there - back).abs() < 1e-9);
                assert!(there.is_finite());
            }
        }
    }

    #[test]
    fn antipodes_are_half_circumference() {
        let dist = distance_km(0.0, 0.0, 0.0, 180.0);
        assert!((dist - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn matrix_matches_pairwise_distance() {
        let waypoints = vec![
            Waypoint::new(53.42, -6.27, "IE").unwrap(),
            Waypoint::new(40.64, -73.78, "US").unwrap(),
            Waypoint::new(10.60, -66.99, "VE").unwrap(),
        ];
        let matrix = DistanceMatrix::build(&waypoints);
        assert_eq!(matrix.size(), 3);
        assert_eq!(matrix.get(1, 1).unwrap(), 0.0);
        assert_eq!(
            matrix.get(0, 2).unwrap(),
            great_circle_distance(&waypoints[0], &waypoints[2])
        );

        let tour = RouteOrdering::new(vec![0, 1, 2, 0]);
        let expected = matrix.get(0, 1).unwrap() + matrix.get(1, 2).unwrap() + matrix.get(2, 0).unwrap();
        assert_eq!(matrix.tour_length(&tour).unwrap(), expected);
        assert!(matrix.get(0, 3).is_err());
    }
}
