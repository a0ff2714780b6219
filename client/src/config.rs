//! Page configuration.

use serde::Deserialize;

use crate::Error;

/// Settings for the lookup page.
///
/// Embedded in the page as JSON; any omitted field takes its default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct ClientConfig {
    /// Path of the air quality lookup proxy.
    pub aqi_endpoint: String,

    /// Path of the subscription endpoint.
    pub subscribe_endpoint: String,

    /// Name of the cookie holding the CSRF token.
    pub csrf_cookie: String,

    /// Request header the CSRF token is sent in.
    pub csrf_header: String,

    /// PM2.5 concentration (µg/m³) above which subscribers are alerted.
    pub alert_pm25_threshold: f64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            aqi_endpoint: "/proxy/openaq/".to_owned(),
            subscribe_endpoint: "/subscribe/".to_owned(),
            csrf_cookie: "csrftoken".to_owned(),
            csrf_header: "X-CSRFToken".to_owned(),
            alert_pm25_threshold: 35.0,
        }
    }
}

impl ClientConfig {
    pub fn from_json(body: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(body)?)
    }
}
