//! Fixed-precision rounding shared by the scoring stages
//!
//! Every derived metric in the pipeline carries a documented number of
//! decimal digits (2 for air quality, 3 for tool and memory outputs, 4 for
//! ingestion quality, calibration error, and reliability). All of them go
//! through [`round_to`] so the behavior stays in one place.

/// Rounds `value` to `digits` decimal digits, half away from zero.
///
/// # Example
///
/// ```
/// use sitewatch::util::round_to;
///
/// assert_eq!(round_to(44.204999, 2), 44.2);
/// assert_eq!(round_to(0.12345, 4), 0.1235);
/// ```
pub fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round() / factor
}
