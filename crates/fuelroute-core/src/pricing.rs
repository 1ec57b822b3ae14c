//! Per-country fuel prices and currency conversion.
//!
//! Fuel prices are quoted in euro per litre. Costs computed from them are
//! therefore in euro until converted with a [`Currency`].

use crate::error::{RouteError, RouteResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelPrice {
    #[serde(default)]
    pub country: String,
    pub iso_country: String,
    /// Euro per litre
    #[serde(alias = "price_eur_lit")]
    pub price: f64,
}

/// Fuel price lookup keyed by ISO country code.
///
/// Entries are fixed once built; lookups of unknown countries fail with
/// [`RouteError::MissingPrice`] rather than defaulting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<FuelPrice>", into = "Vec<FuelPrice>")]
pub struct FuelPriceTable {
    prices: HashMap<String, FuelPrice>,
}

impl FuelPriceTable {
    pub fn new(entries: impl IntoIterator<Item = FuelPrice>) -> Self {
        let prices = entries
            .into_iter()
            .map(|entry| (entry.iso_country.clone(), entry))
            .collect();
        Self { prices }
    }

    pub fn entry(&self, iso_country: &str) -> RouteResult<&FuelPrice> {
        self.prices
            .get(iso_country)
            .ok_or_else(|| RouteError::MissingPrice {
                country: iso_country.to_string(),
            })
    }

    /// Price per litre in `iso_country`.
    pub fn price(&self, iso_country: &str) -> RouteResult<f64> {
        self.entry(iso_country).map(|entry| entry.price)
    }

    pub fn contains(&self, iso_country: &str) -> bool {
        self.prices.contains_key(iso_country)
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl From<Vec<FuelPrice>> for FuelPriceTable {
    fn from(entries: Vec<FuelPrice>) -> Self {
        Self::new(entries)
    }
}

impl From<FuelPriceTable> for Vec<FuelPrice> {
    fn from(table: FuelPriceTable) -> Self {
        let mut entries: Vec<FuelPrice> = table.prices.into_values().collect();
        entries.sort_by(|a, b| a.iso_country.cmp(&b.iso_country));
        entries
    }
}

impl FromIterator<FuelPrice> for FuelPriceTable {
    fn from_iter<I: IntoIterator<Item = FuelPrice>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// A national currency with its euro exchange rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CurrencyFields")]
pub struct Currency {
    #[serde(default)]
    pub country: String,
    pub iso_country: String,
    /// ISO 4217 alphabetic code, e.g. `USD`
    pub code: String,
    #[serde(default)]
    pub name: String,
    /// Euro value of one unit of this currency
    pub euro_to: f64,
    /// Units of this currency bought by one euro
    pub euro_from: f64,
}

impl Currency {
    /// Create a currency, rejecting codes that are not 3 ASCII letters.
    pub fn new(
        country: impl Into<String>,
        iso_country: impl Into<String>,
        code: impl Into<String>,
        name: impl Into<String>,
        euro_to: f64,
        euro_from: f64,
    ) -> RouteResult<Self> {
        let currency = Self {
            country: country.into(),
            iso_country: iso_country.into(),
            code: code.into(),
            name: name.into(),
            euro_to,
            euro_from,
        };
        currency.validate()?;
        Ok(currency)
    }

    pub fn validate(&self) -> RouteResult<()> {
        if self.code.len() == 3 && self.code.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(())
        } else {
            Err(RouteError::InvalidCurrencyCode {
                code: self.code.clone(),
            })
        }
    }

    pub fn convert_to_euro(&self, amount: f64) -> f64 {
        amount * self.euro_to
    }

    pub fn convert_from_euro(&self, amount: f64) -> f64 {
        amount * self.euro_from
    }
}

#[derive(Deserialize)]
struct CurrencyFields {
    #[serde(default)]
    country: String,
    iso_country: String,
    code: String,
    #[serde(default)]
    name: String,
    euro_to: f64,
    euro_from: f64,
}

impl TryFrom<CurrencyFields> for Currency {
    type Error = RouteError;

    fn try_from(fields: CurrencyFields) -> Result<Self, Self::Error> {
        Currency::new(
            fields.country,
            fields.iso_country,
            fields.code,
            fields.name,
            fields.euro_to,
            fields.euro_from,
        )
    }
}

/// Currencies keyed by ISO country code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Currency>", into = "Vec<Currency>")]
pub struct CurrencyTable {
    currencies: HashMap<String, Currency>,
}

impl CurrencyTable {
    pub fn new(entries: impl IntoIterator<Item = Currency>) -> Self {
        let currencies = entries
            .into_iter()
            .map(|entry| (entry.iso_country.clone(), entry))
            .collect();
        Self { currencies }
    }

    pub fn get(&self, iso_country: &str) -> RouteResult<&Currency> {
        self.currencies
            .get(iso_country)
            .ok_or_else(|| RouteError::UnknownCurrency {
                country: iso_country.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.currencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }
}

impl From<Vec<Currency>> for CurrencyTable {
    fn from(entries: Vec<Currency>) -> Self {
        Self::new(entries)
    }
}

impl From<CurrencyTable> for Vec<Currency> {
    fn from(table: CurrencyTable) -> Self {
        let mut entries: Vec<Currency> = table.currencies.into_values().collect();
        entries.sort_by(|a, b| a.iso_country.cmp(&b.iso_country));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> FuelPriceTable {
        vec![
            FuelPrice {
                country: "Ireland".into(),
                iso_country: "IE".into(),
                price: 0.3412,
            },
            FuelPrice {
                country: "United States".into(),
                iso_country: "US".into(),
                price: 0.2487,
            },
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn price_lookup_hits_and_misses() {
        let prices = table();
        assert_eq!(prices.price("US"), Ok(0.2487));
        assert_eq!(prices.entry("IE").unwrap().country, "Ireland");
        assert_eq!(
            prices.price("AU"),
            Err(RouteError::MissingPrice { country: "AU".into() })
        );
    }

    #[test]
    fn price_table_deserializes_from_list() {
        let prices: FuelPriceTable = serde_json::from_str(
            r#"[{"country": "Ireland", "iso_country": "IE", "price_eur_lit": 0.34}]"#,
        )
        .unwrap();
        assert_eq!(prices.len(), 1);
        assert!(prices.contains("IE"));
    }

    #[test]
    fn currency_conversion() {
        let usd = Currency::new("United States", "US", "USD", "US Dollar", 0.9, 1.1).unwrap();
        assert!((usd.convert_to_euro(100.0) - 90.0).abs() < 1e-9);
        assert!((usd.convert_from_euro(100.0) - 110.0).abs() < 1e-9);

        let currencies = CurrencyTable::new(vec![usd]);
        assert_eq!(currencies.get("US").unwrap().code, "USD");
        assert_eq!(
            currencies.get("IE").unwrap_err(),
            RouteError::UnknownCurrency { country: "IE".into() }
        );
    }

    #[test]
    fn currency_code_must_be_three_letters() {
        assert_eq!(
            Currency::new("United States", "US", "US", "US Dollar", 0.9, 1.1),
            Err(RouteError::InvalidCurrencyCode { code: "US".into() })
        );
        assert!(Currency::new("Japan", "JP", "JP1", "Yen", 0.006, 160.0).is_err());

        let parsed = serde_json::from_str::<Currency>(
            r#"{"iso_country": "US", "code": "US", "euro_to": 0.9, "euro_from": 1.1}"#,
        );
        assert!(parsed.is_err());

        let table = serde_json::from_str::<CurrencyTable>(
            r#"[{"iso_country": "US", "code": "DOLLARS", "euro_to": 0.9, "euro_from": 1.1}]"#,
        );
        assert!(table.is_err());

        let table: CurrencyTable = serde_json::from_str(
            r#"[{"iso_country": "US", "code": "USD", "euro_to": 0.9, "euro_from": 1.1}]"#,
        )
        .unwrap();
        assert_eq!(table.get("US").unwrap().code, "USD");
    }
}
