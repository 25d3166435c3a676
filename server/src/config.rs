use chrono::NaiveDate;
use serde::Deserialize;

const PREFIX: &str = "CLIMATE_";

/// Read from `CLIMATE_*` variables.
///
/// The reference date and most active station default to what the dataset
/// says. Setting `CLIMATE_REFERENCE_DATE=2017-08-23` and
/// `CLIMATE_MOST_ACTIVE_STATION=USC00519281` pins them to the historical
/// values instead.
#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Freezes the latest observation date instead of reading it from the dataset.
    pub reference_date: Option<NaiveDate>,
    /// Freezes the most active station instead of counting measurements.
    pub most_active_station: Option<String>,
}

fn default_max_connections() -> u32 {
    5
}

impl Config {
    pub fn from_env() -> anyhow::Result<Config> {
        let config = envy::prefixed(PREFIX).from_env::<Config>()?;
        Ok(config)
    }

    #[cfg(test)]
    fn from_pairs(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<Vec<_>>();
        Ok(envy::prefixed(PREFIX).from_iter(vars)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_pairs(&[]).unwrap();
        assert_eq!(config.max_connections, 5);
        assert!(config.reference_date.is_none());
        assert!(config.most_active_station.is_none());
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_pairs(&[
            ("CLIMATE_MAX_CONNECTIONS", "2"),
            ("CLIMATE_REFERENCE_DATE", "2017-08-23"),
            ("CLIMATE_MOST_ACTIVE_STATION", "USC00519281"),
            ("CLIMATE_DATABASE_URL", "sqlite://ignored.sqlite"),
        ])
        .unwrap();

        assert_eq!(config.max_connections, 2);
        assert_eq!(
            config.reference_date,
            NaiveDate::from_ymd_opt(2017, 8, 23)
        );
        assert_eq!(config.most_active_station.as_deref(), Some("USC00519281"));
    }

    #[test]
    fn rejects_malformed_reference_date() {
        let result = Config::from_pairs(&[("CLIMATE_REFERENCE_DATE", "23/08/2017")]);
        assert!(result.is_err());
    }
}
