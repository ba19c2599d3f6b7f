//! Boundary traits for the systems that feed the matcher.
//!
//! These traits define the two external collaborators: whatever owns the stop
//! catalog (route administration, a database, a TTL cache) and whatever owns
//! the live position feed. Implementations may cache however they like; the
//! matching core only ever sees the data handed back from these calls.

use std::sync::Arc;

use geo::Point;

use crate::identifiers::{RouteIdentifier, VehicleIdentifier};
use crate::models::types::{Direction, RouteDirection, Stop, VehicleFix};

/// A stop of some route-direction, as returned from catalog-wide spatial
/// queries. Cheap to clone.
#[derive(Clone)]
pub struct StopRef {
    pub route: Arc<RouteDirection>,
    pub stop_index: usize,
}

impl StopRef {
    pub fn stop(&self) -> &Stop {
        &self.route.stops()[self.stop_index]
    }
}

/// Supplier of ordered, direction-filtered stop lists.
pub trait StopCatalog: Send + Sync {
    /// The ordered stop list for one (route, direction), if configured.
    fn route_direction(
        &self,
        route_id: &RouteIdentifier,
        direction: Direction,
    ) -> Option<Arc<RouteDirection>>;

    fn all_route_directions(&self) -> Vec<Arc<RouteDirection>>;

    /// All stops within `radius_m` meters of a point, nearest first.
    fn stops_near(&self, point: Point, radius_m: f64) -> Vec<StopRef>;

    /// The `n` stops nearest to a point.
    fn nearest_stops(&self, point: Point, n: usize) -> Vec<StopRef>;
}

/// Supplier of the most recent known fix per vehicle.
pub trait VehiclePositions: Send + Sync {
    fn latest_fix(&self, vehicle_id: &VehicleIdentifier) -> Option<VehicleFix>;

    fn all_latest(&self) -> Vec<VehicleFix>;

    /// Latest fixes within `radius_m` meters of a point, with their
    /// distances, nearest first.
    fn vehicles_within(&self, point: Point, radius_m: f64) -> Vec<(VehicleFix, f64)>;

    /// The `k` vehicles nearest to a point, with their distances.
    fn nearest_vehicles(&self, point: Point, k: usize) -> Vec<(VehicleFix, f64)>;
}
