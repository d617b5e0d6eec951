//! Data storage layer
//!
//! - `filters` - Predicate construction from request parameters
//! - `sqlite` - Read-only SQLite pools and row queries for each dataset
//!
//! Every dataset lives in its own SQLite file with its own table. The
//! tables differ in their value columns but share `tdate`, `ttime` and
//! `param`, which is all the filter layer needs.

pub mod filters;
pub mod sqlite;

pub use sqlite::{Reading, ReadingsStore, SqliteError};

use std::fmt;
use std::str::FromStr;

/// Sensor dataset exposed by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    /// Air quality sensor (PM2.5, temperature, pressure, humidity)
    AirQuality,
    /// Solar production and consumption
    Solar,
    /// Dark Sky weather forecast
    Darksky,
}

impl Dataset {
    pub const ALL: [Dataset; 3] = [Self::AirQuality, Self::Solar, Self::Darksky];

    /// Backing table. Never derived from request input.
    pub fn table(&self) -> &'static str {
        match self {
            Self::AirQuality => "p_environ",
            Self::Solar => "sunpower",
            Self::Darksky => "darksky",
        }
    }

    /// URL path segment
    pub fn slug(&self) -> &'static str {
        match self {
            Self::AirQuality => "air-quality",
            Self::Solar => "solar",
            Self::Darksky => "darksky",
        }
    }

    /// Config file key
    pub fn config_key(&self) -> &'static str {
        match self {
            Self::AirQuality => "air_quality",
            Self::Solar => "solar",
            Self::Darksky => "darksky",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl FromStr for Dataset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.slug() == s)
            .ok_or_else(|| format!("Unknown dataset '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_tables() {
        assert_eq!(Dataset::AirQuality.table(), "p_environ");
        assert_eq!(Dataset::Solar.table(), "sunpower");
        assert_eq!(Dataset::Darksky.table(), "darksky");
    }

    #[test]
    fn dataset_slug_round_trip() {
        for dataset in Dataset::ALL {
            assert_eq!(dataset.slug().parse::<Dataset>(), Ok(dataset));
        }
        assert!("p_environ".parse::<Dataset>().is_err());
        assert!("".parse::<Dataset>().is_err());
    }
}
