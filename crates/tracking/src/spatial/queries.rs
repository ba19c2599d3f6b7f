//! Degree/meter conversions for bounding-box prefilters.
//!
//! The R-tree stores raw lon/lat degrees, so radius queries first convert the
//! requested radius into an over-approximated degree radius, then re-check
//! candidates with the accurate geodesic distance.

/// Convert degrees to approximate meters at the equator (for bounding box queries)
pub fn degrees_to_meters_approx(degrees: f64) -> f64 {
    degrees * 111_320.0 // meters per degree at equator
}

/// Convert meters to degrees at the equator (for bounding box queries)
pub fn meters_to_degrees_approx(meters: f64) -> f64 {
    meters / 111_320.0
}
