//! Core data types and enums for vehicle tracking.

use chrono::{NaiveDateTime, NaiveTime};
use geo::Point;
use std::sync::Arc;

use crate::identifiers::*;

// ============================================================================
// Enums
// ============================================================================

/// Canonical travel direction of a route (0 = outbound, 1 = inbound)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Direction {
    Outbound = 0,
    Inbound = 1,
}

impl Direction {
    /// Normalize a raw direction label from upstream schemas.
    ///
    /// The fleet and scheduling tables disagree on how they spell direction:
    /// `去程`/`返程`, `往`/`回`, `"0"`/`"1"`, sometimes with whitespace. Any
    /// label containing an inbound marker (`返`, `回`) or equal to `"1"` maps
    /// to [`Direction::Inbound`]; everything else, including `None` and
    /// unrecognized strings, maps to [`Direction::Outbound`]. Total over all
    /// inputs, never errors.
    pub fn normalize(raw: Option<&str>) -> Self {
        let label = raw.unwrap_or("").trim();
        if label.contains('返') || label.contains('回') || label == "1" {
            return Self::Inbound;
        }
        if label.contains('去') || label.contains('往') || label == "0" {
            return Self::Outbound;
        }
        Self::Outbound
    }

    /// Canonical display label, itself accepted by [`Direction::normalize`].
    pub fn label(&self) -> &'static str {
        match self {
            Self::Outbound => "去程",
            Self::Inbound => "返程",
        }
    }
}

// ============================================================================
// Data Structures
// ============================================================================

/// A single stop along a route in one direction.
///
/// `location` follows the one fixed axis convention of this crate:
/// x = longitude, y = latitude. Ambiguous X/Y pairs from upstream tables must
/// go through [`VehicleFix::from_provider_xy`] or equivalent validation before
/// they become a `Point`.
#[derive(Clone, Debug)]
pub struct Stop {
    pub stop_name: Arc<str>,
    pub stop_id: Option<StopIdentifier>,
    pub location: Point,
    /// Ordinal position along the route in this direction; unique per
    /// (route, direction).
    pub sequence_index: u32,
    /// Scheduled times-of-day at this stop for the service day, ascending.
    pub schedule: Vec<NaiveTime>,
}

impl Stop {
    pub fn new(
        stop_name: impl Into<Arc<str>>,
        location: Point,
        sequence_index: u32,
        schedule: Vec<NaiveTime>,
    ) -> Self {
        Self {
            stop_name: stop_name.into(),
            stop_id: None,
            location,
            sequence_index,
            schedule,
        }
    }

    pub fn with_stop_id(mut self, stop_id: StopIdentifier) -> Self {
        self.stop_id = Some(stop_id);
        self
    }
}

/// The ordered stop list of one (route, direction) pair.
///
/// Stops are kept sorted ascending by `sequence_index`; the first element is
/// the head stop and the last is the tail stop.
#[derive(Clone, Debug)]
pub struct RouteDirection {
    pub route_id: RouteIdentifier,
    pub direction: Direction,
    stops: Vec<Stop>,
}

impl RouteDirection {
    pub fn new(route_id: RouteIdentifier, direction: Direction, mut stops: Vec<Stop>) -> Self {
        stops.sort_by_key(|s| s.sequence_index);
        Self {
            route_id,
            direction,
            stops,
        }
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn head_stop(&self) -> Option<&Stop> {
        self.stops.first()
    }

    pub fn tail_stop(&self) -> Option<&Stop> {
        self.stops.last()
    }
}

/// The most recent known location of a vehicle.
#[derive(Clone, Debug)]
pub struct VehicleFix {
    pub vehicle_id: VehicleIdentifier,
    /// x = longitude, y = latitude.
    pub position: Point,
    pub observed_at: NaiveDateTime,
}

impl VehicleFix {
    pub fn new(vehicle_id: VehicleIdentifier, position: Point, observed_at: NaiveDateTime) -> Self {
        Self {
            vehicle_id,
            position,
            observed_at,
        }
    }

    /// Boundary constructor for raw X/Y pairs from position feeds.
    ///
    /// The feed convention is X = longitude, Y = latitude, but some upstream
    /// tables store the pair swapped. If the straight reading is out of range
    /// and the swapped reading is valid, the values are swapped; if neither
    /// reading is a valid coordinate the fix is rejected.
    pub fn from_provider_xy(
        vehicle_id: VehicleIdentifier,
        x: f64,
        y: f64,
        observed_at: NaiveDateTime,
    ) -> Result<Self> {
        if coordinate_in_range(y, x) {
            return Ok(Self::new(vehicle_id, Point::new(x, y), observed_at));
        }
        if coordinate_in_range(x, y) {
            tracing::warn!(
                vehicle = %vehicle_id,
                x,
                y,
                "position feed delivered swapped lat/lon, correcting"
            );
            return Ok(Self::new(vehicle_id, Point::new(y, x), observed_at));
        }
        Err(TrackingError::CoordinateOutOfRange { x, y })
    }
}

fn coordinate_in_range(lat: f64, lon: f64) -> bool {
    lat.is_finite() && lon.is_finite() && lat.abs() <= 90.0 && lon.abs() <= 180.0
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum TrackingError {
    #[error("coordinate pair out of range even after axis swap: x={x}, y={y}")]
    CoordinateOutOfRange { x: f64, y: f64 },

    #[error("no stop data for route: {0}")]
    RouteNotFound(RouteIdentifier),

    #[error("no position fix for vehicle: {0}")]
    VehicleNotFound(VehicleIdentifier),
}

pub type Result<T> = std::result::Result<T, TrackingError>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn observed() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_direction_normalization_table() {
        assert_eq!(Direction::normalize(Some("返程")), Direction::Inbound);
        assert_eq!(Direction::normalize(Some("回")), Direction::Inbound);
        assert_eq!(Direction::normalize(Some("1")), Direction::Inbound);
        assert_eq!(Direction::normalize(Some("去程")), Direction::Outbound);
        assert_eq!(Direction::normalize(Some("往")), Direction::Outbound);
        assert_eq!(Direction::normalize(Some("0")), Direction::Outbound);
        assert_eq!(Direction::normalize(None), Direction::Outbound);
        assert_eq!(Direction::normalize(Some("")), Direction::Outbound);
        assert_eq!(Direction::normalize(Some("northbound")), Direction::Outbound);
        assert_eq!(Direction::normalize(Some("  回程  ")), Direction::Inbound);
    }

    #[test]
    fn test_direction_normalization_idempotent() {
        for dir in [Direction::Outbound, Direction::Inbound] {
            assert_eq!(Direction::normalize(Some(dir.label())), dir);
        }
    }

    #[test]
    fn test_route_direction_sorts_stops() {
        let stops = vec![
            Stop::new("third", Point::new(121.62, 23.98), 2, vec![]),
            Stop::new("first", Point::new(121.60, 24.00), 0, vec![]),
            Stop::new("second", Point::new(121.61, 23.99), 1, vec![]),
        ];
        let route = RouteDirection::new(RouteIdentifier::new("23"), Direction::Outbound, stops);

        let names: Vec<&str> = route.stops().iter().map(|s| &*s.stop_name).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
        assert_eq!(&*route.head_stop().unwrap().stop_name, "first");
        assert_eq!(&*route.tail_stop().unwrap().stop_name, "third");
    }

    #[test]
    fn test_fix_straight_reading() {
        let fix =
            VehicleFix::from_provider_xy(VehicleIdentifier::new("ABC-0001"), 121.6, 23.99, observed())
                .unwrap();
        assert_eq!(fix.position.x(), 121.6);
        assert_eq!(fix.position.y(), 23.99);
    }

    #[test]
    fn test_fix_swapped_reading_corrected() {
        // Stored as X=latitude, Y=longitude; straight reading puts 121.6 in
        // the latitude slot, which is impossible.
        let fix =
            VehicleFix::from_provider_xy(VehicleIdentifier::new("ABC-0001"), 23.99, 121.6, observed())
                .unwrap();
        assert_eq!(fix.position.x(), 121.6);
        assert_eq!(fix.position.y(), 23.99);
    }

    #[test]
    fn test_fix_rejected_when_unsalvageable() {
        let err =
            VehicleFix::from_provider_xy(VehicleIdentifier::new("ABC-0001"), 200.0, 200.0, observed())
                .unwrap_err();
        assert!(matches!(err, TrackingError::CoordinateOutOfRange { .. }));
    }
}
