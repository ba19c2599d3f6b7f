//! Great-circle distance on a spherical earth.

use geo::Point;

/// Spherical earth radius in meters. The fleet's upstream systems all use
/// this value, so distances here reproduce theirs bit-for-bit.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance in meters between two points (x = longitude,
/// y = latitude, degrees).
///
/// Symmetric, zero for identical points, never negative. No range
/// validation: callers own coordinate validity, and out-of-range input
/// produces a meaningless but finite number rather than a panic.
pub fn distance_meters(a: Point, b: Point) -> f64 {
    let phi1 = a.y().to_radians();
    let phi2 = b.y().to_radians();
    let dphi = (b.y() - a.y()).to_radians();
    let dlambda = (b.x() - a.x()).to_radians();

    let h = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().atan2((1.0 - h).sqrt())
}
