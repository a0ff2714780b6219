//! Types for surfacing air quality data from the lookup proxy.

use serde::Deserialize;

use crate::Error;

/// Parameter name of a PM2.5 reading, in µg/m³.
pub const PM25: &str = "pm25";
/// Parameter name of a PM10 reading, in µg/m³.
pub const PM10: &str = "pm10";
/// Parameter name of an index reported directly by the upstream provider.
pub const US_AQI: &str = "us_aqi";

/// One observed pollutant reading.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Measurement {
    /// Identifier, e.g. `pm25`.
    pub parameter: String,

    /// Observed value. The proxy may send `null`.
    #[serde(default)]
    pub value: Option<f64>,

    /// Display unit; not used in computation.
    #[serde(default)]
    pub unit: String,
}

impl Measurement {
    pub fn new(parameter: &str, value: f64, unit: &str) -> Self {
        Measurement {
            parameter: parameter.to_owned(),
            value: Some(value),
            unit: unit.to_owned(),
        }
    }
}

/// A snapshot of one monitoring location.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LocationReading {
    /// Display name of the monitoring station.
    pub location: String,
    pub city: String,
    pub country: String,
    #[serde(default)]
    pub measurements: Vec<Measurement>,
}

impl LocationReading {
    /// The first measurement of the given parameter, if any.
    pub fn find(&self, parameter: &str) -> Option<&Measurement> {
        self.measurements.iter().find(|m| m.parameter == parameter)
    }
}

/// Body of a lookup proxy response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AqiResponse {
    #[serde(default)]
    pub results: Vec<LocationReading>,
}

impl AqiResponse {
    /// Decode a response body.
    pub fn from_json(body: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(body)?)
    }
}

/// A type that can look up current air quality for a city.
pub trait AirQualitySource {
    /// Look up the latest readings near the named city.
    ///
    /// An empty result set is not an error here; callers decide
    /// how to report it.
    fn lookup(&mut self, city: &str) -> Result<AqiResponse, Error>;
}

/// The nullary source: never has data.
pub struct NullAirQualitySource {}

impl AirQualitySource for NullAirQualitySource {
    fn lookup(&mut self, _city: &str) -> Result<AqiResponse, Error> {
        Ok(Default::default())
    }
}

/// Provides the indicated response for every city.
pub struct StaticAirQualitySource {
    pub response: AqiResponse,
}

impl AirQualitySource for StaticAirQualitySource {
    fn lookup(&mut self, _city: &str) -> Result<AqiResponse, Error> {
        Ok(self.response.clone())
    }
}

pub mod table;
