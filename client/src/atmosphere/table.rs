//! A source backed by saved proxy responses, keyed by city name.
//!
//! The file is a JSON object mapping each city to the body the proxy
//! returned for it:
//!
//! ```json
//! { "Delhi": { "results": [ ... ] }, "London": { "results": [] } }
//! ```

use std::{collections::HashMap, path::Path};

use super::{AirQualitySource, AqiResponse};
use crate::Error;

#[derive(Debug, Clone, Default)]
pub struct CityTable {
    responses: HashMap<String, AqiResponse>,
}

impl CityTable {
    pub fn new(responses: HashMap<String, AqiResponse>) -> Self {
        CityTable { responses }
    }

    pub fn from_json(body: &str) -> Result<Self, Error> {
        Ok(Self::new(serde_json::from_str(body)?))
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let body = std::fs::read_to_string(path)?;
        Self::from_json(&body)
    }
}

impl AirQualitySource for CityTable {
    fn lookup(&mut self, city: &str) -> Result<AqiResponse, Error> {
        // Exact key first; city names typed by subscribers vary in case.
        let found = self.responses.get(city).or_else(|| {
            self.responses
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(city))
                .map(|(_, v)| v)
        });
        match found {
            Some(response) => Ok(response.clone()),
            None => {
                tracing::debug!("no saved response for {city}");
                Ok(AqiResponse::default())
            }
        }
    }
}
