//! Core data models for route planning.

use crate::error::{RouteError, RouteResult};
use serde::{Deserialize, Serialize};

/// A geographic stop. Index 0 of a waypoint list is always home.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    #[serde(alias = "latitude")]
    pub lat: f64,
    #[serde(alias = "longitude")]
    pub lon: f64,
    /// ISO 3166 alpha-2 code of the country the stop lies in, e.g. `IE`
    #[serde(alias = "iso_country")]
    pub country_iso: String,
    /// Display label such as an IATA code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Waypoint {
    /// Create a validated waypoint.
    pub fn new(lat: f64, lon: f64, country_iso: impl Into<String>) -> RouteResult<Self> {
        let waypoint = Self {
            lat,
            lon,
            country_iso: country_iso.into(),
            label: None,
        };
        waypoint.validate()?;
        Ok(waypoint)
    }

    /// Attach a display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Reject non-finite or out-of-range coordinates.
    pub fn validate(&self) -> RouteResult<()> {
        let lat_ok = self.lat.is_finite() && (-90.0..=90.0).contains(&self.lat);
        let lon_ok = self.lon.is_finite() && (-180.0..=180.0).contains(&self.lon);
        if lat_ok && lon_ok {
            Ok(())
        } else {
            Err(RouteError::InvalidPoint {
                lat: self.lat,
                lon: self.lon,
            })
        }
    }

    /// Label if present, otherwise the rounded coordinates.
    pub fn display_name(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => format!("({:.2}, {:.2})", self.lat, self.lon),
        }
    }
}

/// How a plan is built from the waypoint list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteMode {
    /// Fly the waypoints exactly in input order, no analysis
    Static,
    /// Enumerate every candidate ordering
    #[default]
    Dynamic,
}

impl std::fmt::Display for RouteMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteMode::Static => write!(f, "static"),
            RouteMode::Dynamic => write!(f, "dynamic"),
        }
    }
}

impl std::str::FromStr for RouteMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "static" => Ok(RouteMode::Static),
            "dynamic" => Ok(RouteMode::Dynamic),
            other => Err(format!("unknown route mode '{other}'")),
        }
    }
}

/// Ordered waypoint indices of one candidate tour.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteOrdering(Vec<usize>);

impl RouteOrdering {
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consecutive (origin, destination) index pairs.
    pub fn legs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0.windows(2).map(|pair| (pair[0], pair[1]))
    }

    pub fn leg_count(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// True if two consecutive entries are equal (a self-loop leg).
    pub fn has_adjacent_repeat(&self) -> bool {
        self.legs().any(|(from, to)| from == to)
    }

    /// Resolve indices into the waypoints they name.
    pub fn map_points<'a>(&self, waypoints: &'a [Waypoint]) -> RouteResult<Vec<&'a Waypoint>> {
        self.0
            .iter()
            .map(|&index| {
                waypoints.get(index).ok_or(RouteError::IndexOutOfBounds {
                    index,
                    len: waypoints.len(),
                })
            })
            .collect()
    }

    /// Human readable tour such as `DUB>JFK>DUB`.
    pub fn describe(&self, waypoints: &[Waypoint]) -> String {
        self.0
            .iter()
            .map(|&index| {
                waypoints
                    .get(index)
                    .map(Waypoint::display_name)
                    .unwrap_or_else(|| format!("#{index}"))
            })
            .collect::<Vec<_>>()
            .join(">")
    }
}

impl From<Vec<usize>> for RouteOrdering {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}
