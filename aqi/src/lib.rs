//! US EPA Air Quality Index computation.
//!
//! Converts a PM2.5 concentration into the 0-500 AQI scale,
//! and classifies index values for display and alerting.

mod advice;
mod category;

pub use advice::{alert_advice, health_tip, HealthTip};
pub use category::{Category, Severity};

/// Index reported when a concentration matches no band.
pub const CEILING: u32 = 500;

/// One band of the piecewise-linear AQI table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakpoint {
    /// Lowest concentration (µg/m³) in this band, inclusive.
    pub concentration_low: f64,
    /// Highest concentration (µg/m³) in this band, inclusive.
    pub concentration_high: f64,
    /// Index at `concentration_low`.
    pub index_low: u32,
    /// Index at `concentration_high`.
    pub index_high: u32,
}

impl Breakpoint {
    const fn new(
        concentration_low: f64,
        concentration_high: f64,
        index_low: u32,
        index_high: u32,
    ) -> Self {
        Breakpoint {
            concentration_low,
            concentration_high,
            index_low,
            index_high,
        }
    }

    /// Whether the concentration falls in this band (both ends inclusive).
    pub fn contains(&self, concentration: f64) -> bool {
        concentration >= self.concentration_low && concentration <= self.concentration_high
    }

    /// Linear interpolation of the concentration onto the index range,
    /// before rounding.
    pub fn interpolate(&self, concentration: f64) -> f64 {
        let index_span = (self.index_high - self.index_low) as f64;
        let concentration_span = self.concentration_high - self.concentration_low;
        index_span / concentration_span * (concentration - self.concentration_low)
            + self.index_low as f64
    }
}

/// The US EPA PM2.5 breakpoint table, in ascending order.
///
/// The bands are quoted at one decimal of precision, so there are narrow gaps
/// between them (e.g. 12.0 < c < 12.1). Concentrations in a gap match no band.
pub const PM25_BREAKPOINTS: [Breakpoint; 6] = [
    Breakpoint::new(0.0, 12.0, 0, 50),
    Breakpoint::new(12.1, 35.4, 51, 100),
    Breakpoint::new(35.5, 55.4, 101, 150),
    Breakpoint::new(55.5, 150.4, 151, 200),
    Breakpoint::new(150.5, 250.4, 201, 300),
    Breakpoint::new(250.5, 500.4, 301, 500),
];

/// Find the band for a PM2.5 concentration, if any.
pub fn pm25_band(pm25: f64) -> Option<&'static Breakpoint> {
    PM25_BREAKPOINTS.iter().find(|bp| bp.contains(pm25))
}

/// Compute the AQI for a PM2.5 concentration in µg/m³.
///
/// Rounds half away from zero. A concentration outside every band
/// (negative, above 500.4, NaN, or in a gap between bands) yields [`CEILING`].
pub fn compute_aqi(pm25: f64) -> u32 {
    match pm25_band(pm25) {
        Some(bp) => bp.interpolate(pm25).round() as u32,
        None => CEILING,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn band_edges() {
        assert_eq!(compute_aqi(0.0), 0);
        assert_eq!(compute_aqi(12.0), 50);
        assert_eq!(compute_aqi(12.1), 51);
        assert_eq!(compute_aqi(35.4), 100);
        assert_eq!(compute_aqi(35.5), 101);
        assert_eq!(compute_aqi(55.4), 150);
        assert_eq!(compute_aqi(150.4), 200);
        assert_eq!(compute_aqi(250.4), 300);
        assert_eq!(compute_aqi(500.4), 500);
    }

    #[test]
    fn interpolates_within_band() {
        // 49 / 19.9 * 4.5 + 101
        let bp = pm25_band(40.0).expect("40.0 is in band 3");
        assert_relative_eq!(bp.interpolate(40.0), 112.080_402, epsilon = 1e-5);
        assert_eq!(compute_aqi(40.0), 112);
        assert_eq!(compute_aqi(10.0), 42);
    }

    #[test]
    fn out_of_table_is_ceiling() {
        assert_eq!(compute_aqi(600.0), 500);
        assert_eq!(compute_aqi(500.5), 500);
        assert_eq!(compute_aqi(-5.0), 500);
        assert_eq!(compute_aqi(f64::NAN), 500);
    }

    #[test]
    fn gap_between_bands_is_ceiling() {
        assert!(pm25_band(12.05).is_none());
        assert_eq!(compute_aqi(12.05), 500);
    }

    #[test]
    fn monotonic_over_table() {
        let mut last = 0;
        for tenths in 0..=5004 {
            let pm25 = tenths as f64 / 10.0;
            let aqi = compute_aqi(pm25);
            assert!(aqi >= last, "aqi({pm25}) = {aqi} < {last}");
            assert!(aqi <= CEILING);
            last = aqi;
        }
    }

    #[test]
    fn table_is_contiguous() {
        for pair in PM25_BREAKPOINTS.windows(2) {
            let [lo, hi] = [pair[0], pair[1]];
            assert_eq!(lo.index_high + 1, hi.index_low);
            assert_relative_eq!(lo.concentration_high + 0.1, hi.concentration_low, epsilon = 1e-9);
        }
    }
}
