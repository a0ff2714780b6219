//! Daily alert check for subscribed cities.
//!
//! For each city with subscribers, look up the current readings and, when
//! PM2.5 is above the configured threshold, compose an alert email to
//! everyone subscribed to that city.

use aqi::alert_advice;
use serde::Deserialize;

use crate::{
    atmosphere::{AirQualitySource, PM25},
    config::ClientConfig,
    shape::select_aqi,
    Error,
};

/// An address subscribed to updates for a city.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Subscription {
    pub email: String,
    pub city: String,
}

/// A composed alert, ready to hand to a mailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertEmail {
    pub subject: String,
    pub body: String,
    pub recipients: Vec<String>,
}

/// Compose the alert for one city.
pub fn compose_alert(city: &str, pm25: f64, aqi: u32, recipients: Vec<String>) -> AlertEmail {
    AlertEmail {
        subject: format!("Daily Air Quality Update: {city}"),
        body: format!(
            "Current Air Quality in {city}:\n\n\
             • AQI: {aqi} (US AQI)\n\
             • PM2.5: {pm25} µg/m³\n\n\
             {}",
            alert_advice(aqi)
        ),
        recipients,
    }
}

/// Result of checking one city.
#[derive(Debug)]
pub enum CityReport {
    Alert { city: String, email: AlertEmail },
    Okay {
        city: String,
        pm25: Option<f64>,
        aqi: u32,
    },
    NotFound { city: String },
    Failed { city: String, error: Error },
}

impl core::fmt::Display for CityReport {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CityReport::Alert { city, email } => write!(
                f,
                "Alert for {} subscriber(s) in {}.",
                email.recipients.len(),
                city
            ),
            CityReport::Okay { city, pm25, aqi } => match pm25 {
                Some(pm25) => write!(
                    f,
                    "Air quality in {city} is okay (PM2.5: {pm25}, AQI: {aqi})."
                ),
                None => write!(f, "Air quality in {city} is okay (PM2.5: N/A, AQI: {aqi})."),
            },
            CityReport::NotFound { city } => write!(f, "Could not find {city}."),
            CityReport::Failed { city, error } => write!(f, "Error checking {city}: {error}"),
        }
    }
}

/// Distinct subscribed cities, in the order first seen.
pub fn subscribed_cities(subscriptions: &[Subscription]) -> Vec<&str> {
    let mut cities: Vec<&str> = Vec::new();
    for s in subscriptions {
        if !cities.contains(&s.city.as_str()) {
            cities.push(&s.city);
        }
    }
    cities
}

/// Check a single city against its subscribers.
pub fn check_city<S>(
    source: &mut S,
    city: &str,
    subscriptions: &[Subscription],
    threshold: f64,
) -> CityReport
where
    S: AirQualitySource + ?Sized,
{
    let response = match source.lookup(city) {
        Ok(r) => r,
        Err(error) => {
            tracing::error!("lookup for {city} failed: {error:?}");
            return CityReport::Failed {
                city: city.to_owned(),
                error,
            };
        }
    };
    // The nearest station stands in for the whole city.
    let Some(reading) = response.results.first() else {
        return CityReport::NotFound {
            city: city.to_owned(),
        };
    };

    let pm25 = reading.find(PM25).and_then(|m| m.value);
    let aqi = select_aqi(reading).value();
    match pm25 {
        Some(pm25) if pm25 > threshold => {
            let recipients = subscriptions
                .iter()
                .filter(|s| s.city == city)
                .map(|s| s.email.clone())
                .collect();
            CityReport::Alert {
                city: city.to_owned(),
                email: compose_alert(city, pm25, aqi, recipients),
            }
        }
        _ => CityReport::Okay {
            city: city.to_owned(),
            pm25,
            aqi,
        },
    }
}

/// Check every subscribed city.
///
/// A failed lookup is reported for its city and does not stop the run.
pub fn check_alerts<S>(
    source: &mut S,
    subscriptions: &[Subscription],
    config: &ClientConfig,
) -> Vec<CityReport>
where
    S: AirQualitySource + ?Sized,
{
    subscribed_cities(subscriptions)
        .into_iter()
        .map(|city| {
            tracing::info!("checking {city}");
            check_city(source, city, subscriptions, config.alert_pm25_threshold)
        })
        .collect()
}
