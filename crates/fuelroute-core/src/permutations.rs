//! Candidate tour enumeration.
//!
//! Every tour starts at home (index 0). Dynamic plans consider two families
//! of orderings over the remaining waypoints:
//!
//! - *normal*: each waypoint visited exactly once
//! - *special*: one waypoint visited twice, modelling a return to a hub
//!
//! Enumeration is exhaustive and deterministic. The shortest and cheapest
//! searches break ties by first occurrence, so the order produced here is
//! part of the observable result.

use crate::error::{RouteError, RouteResult};
use crate::models::RouteOrdering;
use serde::{Deserialize, Serialize};

/// Home is always the first waypoint.
pub const HOME_INDEX: usize = 0;

/// Lazy, restartable permutations of a list.
///
/// Items are permuted by position, in lexicographic order of positions, so
/// a list holding a repeated value yields each arrangement of that value
/// once per position swap. An empty or single-item list yields itself once.
#[derive(Debug, Clone)]
pub struct Permutations<T> {
    items: Vec<T>,
    positions: Vec<usize>,
    exhausted: bool,
}

impl<T: Clone> Permutations<T> {
    pub fn new(items: Vec<T>) -> Self {
        let positions = (0..items.len()).collect();
        Self {
            items,
            positions,
            exhausted: false,
        }
    }
}

impl<T: Clone> Iterator for Permutations<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let current = self
            .positions
            .iter()
            .map(|&position| self.items[position].clone())
            .collect();
        self.exhausted = !advance(&mut self.positions);
        Some(current)
    }
}

/// Step to the next lexicographic arrangement. Returns false after the last.
fn advance(positions: &mut [usize]) -> bool {
    let n = positions.len();
    if n < 2 {
        return false;
    }

    let mut pivot = n - 1;
    while pivot > 0 && positions[pivot - 1] >= positions[pivot] {
        pivot -= 1;
    }
    if pivot == 0 {
        return false;
    }

    let mut successor = n - 1;
    while positions[successor] <= positions[pivot - 1] {
        successor -= 1;
    }
    positions.swap(pivot - 1, successor);
    positions[pivot..].reverse();
    true
}

/// Every ordering of `indices`.
pub fn normal_permutations(indices: &[usize]) -> Permutations<usize> {
    Permutations::new(indices.to_vec())
}

/// For each `k` in `indices`, every ordering of `[k] + indices`.
///
/// Orderings are one element longer than `indices` and contain `k` twice,
/// including ones where the two visits are adjacent.
pub fn special_permutations(indices: &[usize]) -> impl Iterator<Item = Vec<usize>> + '_ {
    indices.iter().flat_map(move |&duplicate| {
        let mut items = Vec::with_capacity(indices.len() + 1);
        items.push(duplicate);
        items.extend_from_slice(indices);
        Permutations::new(items)
    })
}

/// Drop orderings that contain a self-loop (two equal adjacent entries).
pub fn remove_adjacent_duplicates<I>(orderings: I) -> impl Iterator<Item = Vec<usize>>
where
    I: IntoIterator<Item = Vec<usize>>,
{
    orderings
        .into_iter()
        .filter(|ordering| ordering.windows(2).all(|pair| pair[0] != pair[1]))
}

/// Prepend home to every ordering, and append it as well when `closed`.
pub fn add_home<I>(orderings: I, closed: bool) -> Vec<RouteOrdering>
where
    I: IntoIterator<Item = Vec<usize>>,
{
    orderings
        .into_iter()
        .map(|ordering| {
            let mut tour = Vec::with_capacity(ordering.len() + 2);
            tour.push(HOME_INDEX);
            tour.extend(ordering);
            if closed {
                tour.push(HOME_INDEX);
            }
            RouteOrdering::new(tour)
        })
        .collect()
}

/// Enumerated tours, normal orderings first, then the filtered special ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateSet {
    orderings: Vec<RouteOrdering>,
    normal_count: usize,
}

impl CandidateSet {
    /// Full enumeration over `waypoint_count` waypoints (home included).
    pub fn dynamic(waypoint_count: usize, closed: bool) -> RouteResult<Self> {
        if waypoint_count == 0 {
            return Err(RouteError::EmptyCandidateSet);
        }
        let others: Vec<usize> = (1..waypoint_count).collect();

        let mut orderings = add_home(normal_permutations(&others), closed);
        let normal_count = orderings.len();
        orderings.extend(add_home(
            remove_adjacent_duplicates(special_permutations(&others)),
            closed,
        ));

        tracing::debug!(
            waypoints = waypoint_count,
            normal = normal_count,
            special = orderings.len() - normal_count,
            "enumerated candidate tours"
        );

        Ok(Self {
            orderings,
            normal_count,
        })
    }

    /// The single tour that visits waypoints in input order.
    pub fn fixed(waypoint_count: usize, closed: bool) -> RouteResult<Self> {
        if waypoint_count == 0 {
            return Err(RouteError::EmptyCandidateSet);
        }
        let mut tour: Vec<usize> = (0..waypoint_count).collect();
        if closed {
            tour.push(HOME_INDEX);
        }
        Ok(Self {
            orderings: vec![RouteOrdering::new(tour)],
            normal_count: 1,
        })
    }

    pub fn orderings(&self) -> &[RouteOrdering] {
        &self.orderings
    }

    pub fn normal(&self) -> &[RouteOrdering] {
        &self.orderings[..self.normal_count]
    }

    pub fn special(&self) -> &[RouteOrdering] {
        &self.orderings[self.normal_count..]
    }

    pub fn len(&self) -> usize {
        self.orderings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orderings.is_empty()
    }
}
