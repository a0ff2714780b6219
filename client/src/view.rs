//! The text content of a result card.

use crate::shape::{DisplayRecord, NOT_AVAILABLE};

/// Everything a result card shows, as strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub title: String,
    pub subtitle: String,
    /// Large index figure; "0" when unavailable.
    pub headline: String,
    pub badge: &'static str,
    pub badge_class: &'static str,
    pub aqi_cell: String,
    pub pm25_cell: String,
    pub pm10_cell: String,
    pub tip: &'static str,
    pub tip_color: &'static str,
    /// City offered in the "subscribe" button.
    pub subscribe_city: String,
}

impl From<&DisplayRecord> for CardView {
    fn from(record: &DisplayRecord) -> Self {
        let aqi = record.aqi_value();
        CardView {
            title: record.location.clone(),
            subtitle: format!("{}, {}", record.city, record.country),
            headline: aqi.to_string(),
            badge: record.status(),
            badge_class: record.badge_class(),
            aqi_cell: if aqi > 0 {
                aqi.to_string()
            } else {
                NOT_AVAILABLE.to_owned()
            },
            pm25_cell: record.pm25.to_string(),
            pm10_cell: record.pm10.to_string(),
            tip: record.health_tip.text,
            tip_color: record.health_tip.color,
            subscribe_city: record.city.clone(),
        }
    }
}

impl core::fmt::Display for CardView {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{} ({})", self.title, self.subtitle)?;
        writeln!(f, "  AQI {} [{}]", self.headline, self.badge)?;
        writeln!(
            f,
            "  AQI: {}  PM2.5: {}  PM10: {}",
            self.aqi_cell, self.pm25_cell, self.pm10_cell
        )?;
        write!(f, "  {}", self.tip)
    }
}
