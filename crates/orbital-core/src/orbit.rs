//! Circular-orbit altitude from mean motion.
//!
//! Kepler's third law for a circular orbit:
//!
//! ```text
//! n        = mean_motion * 2π / 86400        (rad/s)
//! a        = (μ / n²)^(1/3)                  (km)
//! altitude = a - R_earth                     (km)
//! ```
//!
//! This is an approximation for near-circular orbits, not a propagator.

use core::f64::consts::PI;

/// Earth's standard gravitational parameter, km³/s².
pub const MU_EARTH_KM3_S2: f64 = 398_600.441_8;

/// Earth's equatorial radius, km.
pub const EARTH_RADIUS_KM: f64 = 6378.137;

/// Seconds in one mean solar day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Upper bound of plausible derived altitudes, km.
pub const MAX_ALTITUDE_KM: f64 = 100_000.0;

/// Approximate altitude in km for a mean motion in rev/day.
///
/// Returns `None` when the mean motion is not positive or the derived
/// altitude falls outside `[0, 100000]` km; such objects have no altitude
/// and are left out of zone aggregation.
pub fn altitude_from_mean_motion(mean_motion: f64) -> Option<f64> {
    if mean_motion.is_nan() || mean_motion <= 0.0 {
        return None;
    }

    let n = mean_motion * 2.0 * PI / SECONDS_PER_DAY;
    if n <= 0.0 {
        return None;
    }

    let semi_major_axis = (MU_EARTH_KM3_S2 / (n * n)).cbrt();
    let altitude = semi_major_axis - EARTH_RADIUS_KM;

    (0.0..=MAX_ALTITUDE_KM).contains(&altitude).then_some(altitude)
}
