use shared::StationEntry;
use sqlx::FromRow;

#[derive(Clone, Debug, PartialEq, FromRow)]
pub struct Station {
    pub id: i64,
    pub station: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

impl From<Station> for StationEntry {
    fn from(s: Station) -> Self {
        Self {
            station_id: s.station,
            name: s.name,
            lat: s.latitude,
            long: s.longitude,
            elevation: s.elevation,
        }
    }
}

/// One `(date, prcp)` row.
pub type PrecipitationRow = (String, Option<f64>);

/// One `(date, tobs)` row.
pub type TemperatureRow = (String, f64);

/// `(MIN(tobs), MAX(tobs), AVG(tobs))`, all NULL over an empty set.
pub type Aggregates = (Option<f64>, Option<f64>, Option<f64>);
