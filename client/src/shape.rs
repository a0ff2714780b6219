//! Turning raw location readings into display-ready records.

use aqi::{compute_aqi, health_tip, Category, HealthTip};
use serde::Serialize;

use crate::atmosphere::{LocationReading, Measurement, PM10, PM25, US_AQI};

/// Text shown wherever a value is unavailable.
pub const NOT_AVAILABLE: &str = "N/A";

/// Text shown for a record with no index.
pub const UNKNOWN_STATUS: &str = "Unknown";

/// Where a record's index came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Aqi {
    /// Reported directly by the provider (`us_aqi`).
    Reported(u32),
    /// Computed from the PM2.5 concentration.
    Derived(u32),
    Unavailable,
}

impl Aqi {
    /// Index value; 0 when unavailable.
    pub fn value(&self) -> u32 {
        match self {
            Aqi::Reported(v) | Aqi::Derived(v) => *v,
            Aqi::Unavailable => 0,
        }
    }
}

/// A raw measurement passed through for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MeasurementDisplay {
    Value { value: f64, unit: String },
    Unavailable,
}

impl From<Option<&Measurement>> for MeasurementDisplay {
    fn from(m: Option<&Measurement>) -> Self {
        match m {
            Some(Measurement {
                value: Some(value),
                unit,
                ..
            }) => MeasurementDisplay::Value {
                value: *value,
                unit: unit.clone(),
            },
            _ => MeasurementDisplay::Unavailable,
        }
    }
}

impl core::fmt::Display for MeasurementDisplay {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MeasurementDisplay::Value { value, unit } if unit.is_empty() => write!(f, "{value}"),
            MeasurementDisplay::Value { value, unit } => write!(f, "{value} {unit}"),
            MeasurementDisplay::Unavailable => f.write_str(NOT_AVAILABLE),
        }
    }
}

/// The shaped, render-ready result for one monitoring location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRecord {
    pub location: String,
    pub city: String,
    pub country: String,
    pub aqi: Aqi,
    /// None when the index is 0 or unavailable.
    pub category: Option<Category>,
    pub health_tip: HealthTip,
    pub pm25: MeasurementDisplay,
    pub pm10: MeasurementDisplay,
}

impl DisplayRecord {
    pub fn aqi_value(&self) -> u32 {
        self.aqi.value()
    }

    /// Status label, or "Unknown".
    pub fn status(&self) -> &'static str {
        self.category.map_or(UNKNOWN_STATUS, |c| c.label())
    }

    /// Badge stylesheet class; empty when the status is unknown.
    pub fn badge_class(&self) -> &'static str {
        self.category.map_or("", |c| c.severity().css_class())
    }
}

/// Pick the index source for a reading.
///
/// A positive reported index wins; otherwise the index is derived from PM2.5.
pub fn select_aqi(reading: &LocationReading) -> Aqi {
    let reported = reading
        .find(US_AQI)
        .and_then(|m| m.value)
        .filter(|v| *v > 0.0);
    if let Some(v) = reported {
        // Passed through uncapped, up to what a u32 holds.
        return Aqi::Reported(v.round().min(f64::from(u32::MAX)) as u32);
    }
    match reading.find(PM25).and_then(|m| m.value) {
        Some(pm25) => Aqi::Derived(compute_aqi(pm25)),
        None => Aqi::Unavailable,
    }
}

/// Shape one location's readings for display.
pub fn shape_result(reading: &LocationReading) -> DisplayRecord {
    let aqi = select_aqi(reading);
    let value = aqi.value();
    DisplayRecord {
        location: reading.location.clone(),
        city: reading.city.clone(),
        country: reading.country.clone(),
        aqi,
        category: Category::from_aqi(value),
        health_tip: health_tip(value),
        pm25: reading.find(PM25).into(),
        pm10: reading.find(PM10).into(),
    }
}

/// Shape every reading, preserving order.
pub fn shape_results(readings: &[LocationReading]) -> Vec<DisplayRecord> {
    readings.iter().map(shape_result).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(measurements: Vec<Measurement>) -> LocationReading {
        LocationReading {
            location: "Station A".into(),
            city: "Delhi".into(),
            country: "IN".into(),
            measurements,
        }
    }

    #[test]
    fn reported_index_takes_priority() {
        let r = reading(vec![
            Measurement::new(PM25, 300.0, "µg/m³"),
            Measurement::new(US_AQI, 75.0, ""),
        ]);
        let record = shape_result(&r);
        assert_eq!(record.aqi, Aqi::Reported(75));
        assert_eq!(record.aqi_value(), 75);
        assert_eq!(record.status(), "Moderate");
    }

    #[test]
    fn reported_index_is_rounded() {
        let r = reading(vec![Measurement::new(US_AQI, 150.5, "")]);
        assert_eq!(shape_result(&r).aqi, Aqi::Reported(151));
    }

    #[test]
    fn huge_reported_index_saturates() {
        let r = reading(vec![Measurement::new(US_AQI, 1e12, "")]);
        let record = shape_result(&r);
        assert_eq!(record.aqi, Aqi::Reported(u32::MAX));
        assert_eq!(record.status(), "Hazardous");
    }

    #[test]
    fn derives_from_pm25() {
        let r = reading(vec![Measurement::new(PM25, 10.0, "µg/m³")]);
        let record = shape_result(&r);
        assert_eq!(record.aqi, Aqi::Derived(compute_aqi(10.0)));
        assert_eq!(record.status(), "Good");
        assert_eq!(record.badge_class(), "aqi-good");
    }

    #[test]
    fn zero_or_null_reported_index_falls_back() {
        let mut r = reading(vec![
            Measurement::new(US_AQI, 0.0, ""),
            Measurement::new(PM25, 10.0, "µg/m³"),
        ]);
        assert_eq!(shape_result(&r).aqi, Aqi::Derived(42));

        r.measurements[0].value = None;
        assert_eq!(shape_result(&r).aqi, Aqi::Derived(42));
    }

    #[test]
    fn nothing_to_go_on() {
        let r = reading(vec![Measurement::new(PM10, 20.0, "µg/m³")]);
        let record = shape_result(&r);
        assert_eq!(record.aqi, Aqi::Unavailable);
        assert_eq!(record.aqi_value(), 0);
        assert_eq!(record.status(), "Unknown");
        assert_eq!(record.badge_class(), "");
        assert_eq!(record.pm25, MeasurementDisplay::Unavailable);
        assert_eq!(record.pm10.to_string(), "20 µg/m³");
    }

    #[test]
    fn clean_air_derives_zero_and_stays_unknown() {
        let r = reading(vec![Measurement::new(PM25, 0.0, "µg/m³")]);
        let record = shape_result(&r);
        assert_eq!(record.aqi, Aqi::Derived(0));
        assert_eq!(record.status(), "Unknown");
    }

    #[test]
    fn category_boundaries() {
        for (index, status) in [
            (50.0, "Good"),
            (51.0, "Moderate"),
            (150.0, "Unhealthy for Sensitive Groups"),
            (151.0, "Unhealthy"),
            (301.0, "Hazardous"),
        ] {
            let r = reading(vec![Measurement::new(US_AQI, index, "")]);
            assert_eq!(shape_result(&r).status(), status, "index {index}");
        }
    }

    #[test]
    fn delhi_station() {
        let body = r#"{"results": [{"location": "Station A", "city": "Delhi", "country": "IN",
            "measurements": [{"parameter": "pm25", "value": 40.0, "unit": "µg/m³"}]}]}"#;
        let response = crate::atmosphere::AqiResponse::from_json(body).unwrap();
        let records = shape_results(&response.results);
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.aqi, Aqi::Derived(112));
        assert_eq!(record.status(), "Unhealthy for Sensitive Groups");
        assert_eq!(record.badge_class(), "aqi-moderate");
        assert_eq!(record.pm25.to_string(), "40 µg/m³");
        assert_eq!(record.pm10.to_string(), "N/A");
        assert_eq!(
            record.health_tip.text,
            "Sensitive groups should limit outdoor activity."
        );
    }

    #[test]
    fn record_serializes() {
        let r = reading(vec![Measurement::new(PM25, 40.0, "µg/m³")]);
        let json = serde_json::to_value(shape_result(&r)).unwrap();
        assert_eq!(json["location"], "Station A");
        assert_eq!(json["aqi"]["Derived"], 112);
        assert_eq!(json["category"], "UnhealthyForSensitiveGroups");
        assert_eq!(json["health_tip"]["color"], "#f59e0b");
        assert_eq!(json["pm25"]["Value"]["value"], 40.0);
        assert_eq!(json["pm25"]["Value"]["unit"], "µg/m³");
        assert_eq!(json["pm10"], "Unavailable");
    }

    #[test]
    fn unknown_record_serializes_without_category() {
        let json = serde_json::to_value(shape_result(&reading(vec![]))).unwrap();
        assert_eq!(json["aqi"], "Unavailable");
        assert!(json["category"].is_null());
    }

    #[test]
    fn preserves_order() {
        let mut a = reading(vec![Measurement::new(US_AQI, 20.0, "")]);
        a.location = "A".into();
        let mut b = reading(vec![]);
        b.location = "B".into();
        let records = shape_results(&[a, b]);
        let names: Vec<_> = records.iter().map(|r| r.location.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
    }
}
