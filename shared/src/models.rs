use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Precipitation by ISO date. A date observed by several stations keeps the
/// last value read.
pub type Precipitation = BTreeMap<String, Option<f64>>;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct StationEntry {
    pub station_id: String,
    pub name: String,
    pub lat: f64,
    pub long: f64,
    pub elevation: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TemperatureReading {
    pub date: String,
    pub temperature: f64,
}

/// Aggregates over a date range. All fields are `None` when no rows match.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct TemperatureSummary {
    pub min_temp: Option<f64>,
    pub max_temp: Option<f64>,
    pub avg_temp: Option<f64>,
}

impl TemperatureSummary {
    pub fn is_empty(&self) -> bool {
        self.min_temp.is_none() && self.max_temp.is_none() && self.avg_temp.is_none()
    }
}
