//! Aircraft performance data.
//!
//! Catalog entries are recorded in whatever unit system the source data
//! uses. They are normalised to kilometres and litres exactly once, when an
//! [`AircraftProfile`] is built, so the cost simulation never deals in units.

use crate::error::{RouteError, RouteResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Statute miles to kilometres.
pub const MILE_TO_KM: f64 = 1.60934;
/// US gallons to litres.
pub const GALLON_TO_LITRE: f64 = 3.78541;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// Kilometres and litres
    #[default]
    Metric,
    /// Miles and US gallons
    Imperial,
}

/// An aircraft as it appears in a catalog, in its native units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftSpec {
    pub code: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub engine_type: String,
    #[serde(default)]
    pub units: UnitSystem,
    /// Maximum flying range in `units`
    pub range: f64,
    /// Maximum fuel capacity in `units`
    pub capacity: f64,
}

impl AircraftSpec {
    /// `"<manufacturer> <code>"`, e.g. `Boeing 757-200`.
    pub fn display_name(&self) -> String {
        if self.manufacturer.is_empty() {
            self.code.clone()
        } else {
            format!("{} {}", self.manufacturer, self.code)
        }
    }

    pub fn range_km(&self) -> f64 {
        match self.units {
            UnitSystem::Metric => self.range,
            UnitSystem::Imperial => self.range * MILE_TO_KM,
        }
    }

    pub fn capacity_l(&self) -> f64 {
        match self.units {
            UnitSystem::Metric => self.capacity,
            UnitSystem::Imperial => self.capacity * GALLON_TO_LITRE,
        }
    }

    /// Normalise into a metric profile.
    pub fn profile(&self) -> RouteResult<AircraftProfile> {
        AircraftProfile::new(self.range_km(), self.capacity_l())
    }
}

/// Metric performance figures used by the cost simulation.
///
/// Fields are private so the derived consumption rate cannot drift from the
/// range and capacity it was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProfileFields", into = "ProfileFields")]
pub struct AircraftProfile {
    max_range_km: f64,
    fuel_capacity_l: f64,
    consumption_rate_l_per_km: f64,
}

impl AircraftProfile {
    /// Build a profile; `consumption_rate = fuel_capacity / max_range`.
    pub fn new(max_range_km: f64, fuel_capacity_l: f64) -> RouteResult<Self> {
        if !max_range_km.is_finite() || max_range_km <= 0.0 {
            return Err(RouteError::InvalidAircraft(format!(
                "range must be positive, got {max_range_km}"
            )));
        }
        if !fuel_capacity_l.is_finite() || fuel_capacity_l <= 0.0 {
            return Err(RouteError::InvalidAircraft(format!(
                "fuel capacity must be positive, got {fuel_capacity_l}"
            )));
        }
        Ok(Self {
            max_range_km,
            fuel_capacity_l,
            consumption_rate_l_per_km: fuel_capacity_l / max_range_km,
        })
    }

    pub fn max_range_km(&self) -> f64 {
        self.max_range_km
    }

    pub fn fuel_capacity_l(&self) -> f64 {
        self.fuel_capacity_l
    }

    pub fn consumption_rate_l_per_km(&self) -> f64 {
        self.consumption_rate_l_per_km
    }

    /// Litres burned flying `distance_km`.
    pub fn fuel_for(&self, distance_km: f64) -> f64 {
        self.consumption_rate_l_per_km * distance_km
    }

    pub fn in_range(&self, distance_km: f64) -> bool {
        distance_km <= self.max_range_km
    }
}

#[derive(Serialize, Deserialize)]
struct ProfileFields {
    max_range_km: f64,
    fuel_capacity_l: f64,
}

impl TryFrom<ProfileFields> for AircraftProfile {
    type Error = RouteError;

    fn try_from(fields: ProfileFields) -> Result<Self, Self::Error> {
        AircraftProfile::new(fields.max_range_km, fields.fuel_capacity_l)
    }
}

impl From<AircraftProfile> for ProfileFields {
    fn from(profile: AircraftProfile) -> Self {
        Self {
            max_range_km: profile.max_range_km,
            fuel_capacity_l: profile.fuel_capacity_l,
        }
    }
}

/// Aircraft specs keyed by code.
#[derive(Debug, Clone, Default)]
pub struct AircraftCatalog {
    aircraft: BTreeMap<String, AircraftSpec>,
}

impl AircraftCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, spec: AircraftSpec) {
        self.aircraft.insert(spec.code.clone(), spec);
    }

    /// Look up by exact code, e.g. `737`.
    pub fn get(&self, code: &str) -> RouteResult<&AircraftSpec> {
        self.aircraft
            .get(code)
            .ok_or_else(|| RouteError::UnknownAircraft {
                code: code.to_string(),
            })
    }

    /// Look up by display string; the last word is taken as the code.
    pub fn get_by_display(&self, display: &str) -> Option<&AircraftSpec> {
        let code = display.split_whitespace().last()?.trim().to_uppercase();
        self.aircraft.get(&code)
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.aircraft.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.aircraft.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aircraft.is_empty()
    }
}

impl FromIterator<AircraftSpec> for AircraftCatalog {
    fn from_iter<I: IntoIterator<Item = AircraftSpec>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for spec in iter {
            catalog.insert(spec);
        }
        catalog
    }
}
