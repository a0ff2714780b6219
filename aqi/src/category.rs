//! Status categories for index values.

use serde::Serialize;

/// AQI status category, as shown on a result badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Category {
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

/// Coarse severity class of a [`Category`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Good,
    Moderate,
    Poor,
}

impl Category {
    /// Classify an index value.
    ///
    /// Zero means "no index available" and has no category.
    pub fn from_aqi(aqi: u32) -> Option<Category> {
        let category = match aqi {
            0 => return None,
            1..=50 => Category::Good,
            51..=100 => Category::Moderate,
            101..=150 => Category::UnhealthyForSensitiveGroups,
            151..=200 => Category::Unhealthy,
            201..=300 => Category::VeryUnhealthy,
            _ => Category::Hazardous,
        };
        Some(category)
    }

    /// Human-readable status label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Good => "Good",
            Category::Moderate => "Moderate",
            Category::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            Category::Unhealthy => "Unhealthy",
            Category::VeryUnhealthy => "Very Unhealthy",
            Category::Hazardous => "Hazardous",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Category::Good => Severity::Good,
            Category::Moderate | Category::UnhealthyForSensitiveGroups => Severity::Moderate,
            Category::Unhealthy | Category::VeryUnhealthy | Category::Hazardous => Severity::Poor,
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

impl Severity {
    /// Stylesheet class for a badge of this severity.
    pub fn css_class(&self) -> &'static str {
        match self {
            Severity::Good => "aqi-good",
            Severity::Moderate => "aqi-moderate",
            Severity::Poor => "aqi-poor",
        }
    }
}
