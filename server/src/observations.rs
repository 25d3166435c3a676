use chrono::{Duration, NaiveDate};
use shared::TemperatureSummary;
use std::fmt;

use crate::config::Config;
use crate::db;
use crate::models::Aggregates;
use crate::repos::measurements;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Used when the dataset holds no measurement at all.
pub const FALLBACK_LATEST_DATE: &str = "2017-08-23";
pub const FALLBACK_MOST_ACTIVE_STATION: &str = "USC00519281";

const YEAR_DAYS: i64 = 365;

#[derive(Debug, Clone, PartialEq)]
pub struct BadDate {
    pub input: String,
}

impl fmt::Display for BadDate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Invalid date '{}', expected YYYY-MM-DD.", self.input)
    }
}

impl std::error::Error for BadDate {}

pub fn parse_date(input: &str) -> Result<NaiveDate, BadDate> {
    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| BadDate {
        input: input.to_string(),
    })
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Latest observation date and busiest station, fixed for the process lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferencePoint {
    pub latest_date: NaiveDate,
    pub most_active_station: String,
}

impl ReferencePoint {
    pub fn fallback() -> Self {
        Self {
            latest_date: parse_date(FALLBACK_LATEST_DATE).expect("valid fallback date"),
            most_active_station: FALLBACK_MOST_ACTIVE_STATION.to_string(),
        }
    }

    pub fn year_ago(&self) -> NaiveDate {
        self.latest_date - Duration::days(YEAR_DAYS)
    }

    /// Configured overrides first, then the dataset, then the fallback.
    pub async fn resolve(conn: &mut db::Connection, config: &Config) -> anyhow::Result<Self> {
        let fallback = Self::fallback();

        let latest_date = match config.reference_date {
            Some(date) => date,
            None => match measurements::latest_date(conn).await? {
                Some(stored) => parse_date(&stored)?,
                None => {
                    log::warn!("No measurements, using {} as latest date", fallback.latest_date);
                    fallback.latest_date
                }
            },
        };

        let most_active_station = match &config.most_active_station {
            Some(station) => station.clone(),
            None => match measurements::most_active_station(conn).await? {
                Some(station) => station,
                None => {
                    log::warn!(
                        "No measurements, using {} as most active station",
                        fallback.most_active_station
                    );
                    fallback.most_active_station
                }
            },
        };

        Ok(Self {
            latest_date,
            most_active_station,
        })
    }
}

/// Two decimals, ties to even.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

pub fn summarize((min, max, avg): Aggregates) -> TemperatureSummary {
    TemperatureSummary {
        min_temp: min,
        max_temp: max,
        avg_temp: avg.map(round2),
    }
}
