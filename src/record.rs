//! Typed rows of the EV population dataset.

use serde::{Deserialize, Deserializer};

/// One row of the EV population CSV, validated once at the load boundary.
///
/// Every consumed field is optional: the published dataset has blank cells and
/// the occasional non-numeric value in numeric columns. Those become `None`
/// here, so downstream aggregation never needs runtime type checks and never
/// mistakes a missing value for zero.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct VehicleRecord {
    #[serde(rename = "County", deserialize_with = "lenient_string", default)]
    pub county: Option<String>,

    #[serde(rename = "City", deserialize_with = "lenient_string", default)]
    pub city: Option<String>,

    #[serde(rename = "State", deserialize_with = "lenient_string", default)]
    pub state: Option<String>,

    #[serde(rename = "Model Year", deserialize_with = "lenient_int", default)]
    pub model_year: Option<i32>,

    #[serde(rename = "Make", deserialize_with = "lenient_string", default)]
    pub make: Option<String>,

    #[serde(rename = "Model", deserialize_with = "lenient_string", default)]
    pub model: Option<String>,

    #[serde(
        rename = "Electric Vehicle Type",
        deserialize_with = "lenient_string",
        default
    )]
    pub ev_type: Option<String>,

    #[serde(rename = "Electric Range", deserialize_with = "lenient_int", default)]
    pub electric_range: Option<i32>,
}

impl VehicleRecord {
    /// Electric range usable for range statistics.
    ///
    /// The dataset records `0` for vehicles whose range was not measured, so a
    /// range only counts when it is strictly positive. This is a business rule
    /// of the range charts, not a generic numeric constraint.
    pub fn positive_range(&self) -> Option<i32> {
        self.electric_range.filter(|range| *range > 0)
    }
}

/// Empty and whitespace-only cells become `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

/// Non-numeric and empty cells become `None`, never an error and never zero.
fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.trim().parse::<i32>().ok()))
}
