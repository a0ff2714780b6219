//! Health advice attached to index values.
//!
//! The card tip and the alert email each have their own thresholds;
//! neither is derived from [`crate::Category`].

use serde::Serialize;

/// A short recommendation and the colour it is shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthTip {
    pub text: &'static str,
    /// CSS colour, e.g. `#10b981`.
    pub color: &'static str,
}

const GREEN: &str = "#10b981";
const AMBER: &str = "#f59e0b";
const RED: &str = "#ef4444";
const DARK_RED: &str = "#dc2626";

/// Tip shown on a result card.
pub fn health_tip(aqi: u32) -> HealthTip {
    let (text, color) = match aqi {
        0..=50 => ("Great day to go outside!", GREEN),
        51..=100 => ("Air quality is acceptable for most people.", AMBER),
        101..=150 => ("Sensitive groups should limit outdoor activity.", AMBER),
        151..=200 => ("Everyone should reduce prolonged outdoor exertion.", RED),
        201..=300 => (
            "⚠️ Wear a mask if going outside. Avoid outdoor activities.",
            RED,
        ),
        _ => ("🚨 Stay indoors. Wear N95 mask if you must go out.", DARK_RED),
    };
    HealthTip { text, color }
}

/// Closing line of an alert email.
pub fn alert_advice(aqi: u32) -> &'static str {
    if aqi > 300 {
        "🚨 Air quality is HAZARDOUS. Stay indoors and wear N95 mask if you must go out."
    } else if aqi > 200 {
        "⚠️ Air quality is VERY UNHEALTHY. Wear a mask if going outside."
    } else if aqi > 150 {
        "Air quality is UNHEALTHY. Reduce outdoor activities."
    } else if aqi > 100 {
        "Air quality is UNHEALTHY for Sensitive Groups."
    } else if aqi > 50 {
        "Air quality is MODERATE. Sensitive groups should be cautious."
    } else {
        "✅ Air quality is GOOD. Great day to go outside!"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tip_colors() {
        assert_eq!(health_tip(0).color, GREEN);
        assert_eq!(health_tip(50).color, GREEN);
        assert_eq!(health_tip(51).color, AMBER);
        assert_eq!(health_tip(150).color, AMBER);
        assert_eq!(health_tip(151).color, RED);
        assert_eq!(health_tip(300).color, RED);
        assert_eq!(health_tip(301).color, DARK_RED);
    }

    #[test]
    fn tip_text_at_each_threshold() {
        for (aqi, text) in [
            (0, "Great day to go outside!"),
            (50, "Great day to go outside!"),
            (51, "Air quality is acceptable for most people."),
            (100, "Air quality is acceptable for most people."),
            (150, "Sensitive groups should limit outdoor activity."),
            (151, "Everyone should reduce prolonged outdoor exertion."),
            (200, "Everyone should reduce prolonged outdoor exertion."),
            (201, "⚠️ Wear a mask if going outside. Avoid outdoor activities."),
            (300, "⚠️ Wear a mask if going outside. Avoid outdoor activities."),
            (301, "🚨 Stay indoors. Wear N95 mask if you must go out."),
            (500, "🚨 Stay indoors. Wear N95 mask if you must go out."),
        ] {
            assert_eq!(health_tip(aqi).text, text, "aqi {aqi}");
        }
    }

    #[test]
    fn tip_text_changes_inside_moderate_category() {
        // 100 and 101 share a badge severity but not a tip.
        assert_eq!(
            health_tip(100).text,
            "Air quality is acceptable for most people."
        );
        assert_eq!(
            health_tip(101).text,
            "Sensitive groups should limit outdoor activity."
        );
    }

    #[test]
    fn alert_thresholds_are_strict() {
        assert!(alert_advice(50).contains("GOOD"));
        assert!(alert_advice(51).contains("MODERATE"));
        assert!(alert_advice(150).contains("Sensitive Groups"));
        assert!(alert_advice(200).starts_with("Air quality is UNHEALTHY."));
        assert!(alert_advice(201).contains("VERY UNHEALTHY"));
        assert!(alert_advice(301).contains("HAZARDOUS"));
    }
}
