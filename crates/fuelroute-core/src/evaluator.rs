//! Route distance evaluation.

use crate::error::{RouteError, RouteResult};
use crate::models::{RouteOrdering, Waypoint};
use crate::spatial::DistanceMatrix;
use serde::{Deserialize, Serialize};

/// Total great-circle length of one candidate tour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceResult {
    pub total_km: f64,
    /// Length of each leg, in tour order
    pub legs_km: Vec<f64>,
}

/// The shortest candidate and where it sits in the candidate list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortestRoute {
    pub index: usize,
    pub ordering: RouteOrdering,
    pub distance_km: f64,
}

/// Measure every ordering against `waypoints`.
pub fn evaluate(
    orderings: &[RouteOrdering],
    waypoints: &[Waypoint],
) -> RouteResult<Vec<DistanceResult>> {
    evaluate_with_matrix(orderings, &DistanceMatrix::build(waypoints))
}

/// Measure every ordering using precomputed leg distances.
pub fn evaluate_with_matrix(
    orderings: &[RouteOrdering],
    matrix: &DistanceMatrix,
) -> RouteResult<Vec<DistanceResult>> {
    if orderings.is_empty() {
        return Err(RouteError::EmptyCandidateSet);
    }
    orderings
        .iter()
        .map(|ordering| {
            let legs_km = ordering
                .legs()
                .map(|(from, to)| matrix.get(from, to))
                .collect::<RouteResult<Vec<f64>>>()?;
            Ok(DistanceResult {
                total_km: legs_km.iter().sum(),
                legs_km,
            })
        })
        .collect()
}

/// Index of the smallest total; ties go to the earliest candidate.
pub fn argmin_distance(results: &[DistanceResult]) -> RouteResult<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, result) in results.iter().enumerate() {
        match best {
            Some((_, best_km)) if result.total_km >= best_km => {}
            _ => best = Some((index, result.total_km)),
        }
    }
    best.map(|(index, _)| index)
        .ok_or(RouteError::EmptyCandidateSet)
}

/// Pick the shortest of `orderings` given their evaluated distances.
pub fn shortest(
    orderings: &[RouteOrdering],
    results: &[DistanceResult],
) -> RouteResult<ShortestRoute> {
    let index = argmin_distance(results)?;
    let ordering = orderings
        .get(index)
        .cloned()
        .ok_or(RouteError::EmptyCandidateSet)?;
    Ok(ShortestRoute {
        index,
        ordering,
        distance_km: results[index].total_km,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::great_circle_distance;

    fn waypoints() -> Vec<Waypoint> {
        vec![
            Waypoint::new(53.42, -6.27, "IE").unwrap(),
            Waypoint::new(40.64, -73.78, "US").unwrap(),
            Waypoint::new(10.60, -66.99, "VE").unwrap(),
            Waypoint::new(35.42, 51.15, "IR").unwrap(),
        ]
    }

    #[test]
    fn totals_are_sums_of_legs() {
        let wps = waypoints();
        let tour = RouteOrdering::new(vec![0, 1, 2, 0]);
        let results = evaluate(std::slice::from_ref(&tour), &wps).unwrap();
        let expected = great_circle_distance(&wps[0], &wps[1])
            + great_circle_distance(&wps[1], &wps[2])
            + great_circle_distance(&wps[2], &wps[0]);
        assert!((results[0].total_km - expected).abs() < 1e-9);
        assert_eq!(results[0].legs_km.len(), 3);
    }

    #[test]
    fn shortest_is_no_longer_than_any_candidate() {
        let wps = waypoints();
        let orderings = vec![
            RouteOrdering::new(vec![0, 3, 1, 2, 0]),
            RouteOrdering::new(vec![0, 1, 2, 3, 0]),
            RouteOrdering::new(vec![0, 2, 3, 1, 0]),
        ];
        let results = evaluate(&orderings, &wps).unwrap();
        let best = shortest(&orderings, &results).unwrap();
        assert!(results.iter().all(|r| best.distance_km <= r.total_km));

        let again = evaluate(&orderings, &wps).unwrap();
        assert_eq!(shortest(&orderings, &again).unwrap(), best);
    }

    #[test]
    fn ties_go_to_first_occurrence() {
        let wps = waypoints();
        // A tour and its reverse have the same length.
        let orderings = vec![
            RouteOrdering::new(vec![0, 1, 2, 0]),
            RouteOrdering::new(vec![0, 2, 1, 0]),
        ];
        let mut results = evaluate(&orderings, &wps).unwrap();
        results[1].total_km = results[0].total_km;
        assert_eq!(argmin_distance(&results).unwrap(), 0);
    }

    #[test]
    fn empty_candidates_fail() {
        assert_eq!(
            evaluate(&[], &waypoints()),
            Err(RouteError::EmptyCandidateSet)
        );
        assert_eq!(argmin_distance(&[]), Err(RouteError::EmptyCandidateSet));
    }

    #[test]
    fn out_of_bounds_index_fails() {
        let result = evaluate(&[RouteOrdering::new(vec![0, 9])], &waypoints());
        assert!(matches!(result, Err(RouteError::IndexOutOfBounds { index: 9, .. })));
    }
}
