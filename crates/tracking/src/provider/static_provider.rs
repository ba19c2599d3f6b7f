//! In-memory providers.
//!
//! These are the reference implementations of the boundary traits: a stop
//! catalog with a spatial index over every stop, and a vehicle feed that
//! keeps the single most recent fix per vehicle. Production deployments can
//! substitute database- or cache-backed implementations behind the same
//! traits.

use std::collections::HashMap;
use std::sync::Arc;

use geo::Point;
use rstar::RTree;

use crate::geodesic::distance_meters;
use crate::identifiers::{RouteIdentifier, VehicleIdentifier};
use crate::models::types::{Direction, RouteDirection, VehicleFix};
use crate::provider::traits::{StopCatalog, StopRef, VehiclePositions};
use crate::spatial::index::StopNode;
use crate::spatial::queries::meters_to_degrees_approx;

// Longitude degrees shrink with latitude, so the Euclidean prefilter pads the
// degree radius to stay an over-approximation. A factor of 2 covers service
// areas up to 60° latitude.
const PREFILTER_PAD: f64 = 2.0;

// ============================================================================
// Stop Catalog
// ============================================================================

/// In-memory stop catalog with spatial indexing.
///
/// Cheap to clone since all route data is stored in `Arc`s.
#[derive(Clone)]
pub struct StaticStopCatalog {
    routes: Vec<Arc<RouteDirection>>,
    route_map: HashMap<(RouteIdentifier, Direction), Arc<RouteDirection>>,
    stop_tree: RTree<StopNode>,
}

impl StaticStopCatalog {
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            route_map: HashMap::new(),
            stop_tree: RTree::new(),
        }
    }

    /// Build the catalog from route-direction stop lists.
    pub fn from_routes(routes: Vec<RouteDirection>) -> Self {
        let routes: Vec<Arc<RouteDirection>> = routes.into_iter().map(Arc::new).collect();

        let route_map: HashMap<_, _> = routes
            .iter()
            .map(|r| ((r.route_id.clone(), r.direction), r.clone()))
            .collect();

        let mut nodes = Vec::new();
        for route in &routes {
            for stop_index in 0..route.stops().len() {
                nodes.push(StopNode::new(route.clone(), stop_index));
            }
        }
        let stop_tree = RTree::bulk_load(nodes);

        Self {
            routes,
            route_map,
            stop_tree,
        }
    }
}

impl Default for StaticStopCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl StopCatalog for StaticStopCatalog {
    fn route_direction(
        &self,
        route_id: &RouteIdentifier,
        direction: Direction,
    ) -> Option<Arc<RouteDirection>> {
        self.route_map.get(&(route_id.clone(), direction)).cloned()
    }

    fn all_route_directions(&self) -> Vec<Arc<RouteDirection>> {
        self.routes.clone()
    }

    fn stops_near(&self, point: Point, radius_m: f64) -> Vec<StopRef> {
        if radius_m <= 0.0 || !radius_m.is_finite() {
            return Vec::new();
        }

        let radius_deg = meters_to_degrees_approx(radius_m) * PREFILTER_PAD;
        let mut hits: Vec<(StopRef, f64)> = self
            .stop_tree
            .locate_within_distance([point.x(), point.y()], radius_deg * radius_deg)
            .filter_map(|node| {
                let d = distance_meters(point, node.stop().location);
                (d <= radius_m).then(|| {
                    (
                        StopRef {
                            route: node.route.clone(),
                            stop_index: node.stop_index,
                        },
                        d,
                    )
                })
            })
            .collect();

        hits.sort_by(|a, b| a.1.total_cmp(&b.1));
        hits.into_iter().map(|(stop_ref, _)| stop_ref).collect()
    }

    fn nearest_stops(&self, point: Point, n: usize) -> Vec<StopRef> {
        self.stop_tree
            .nearest_neighbor_iter(&[point.x(), point.y()])
            .take(n)
            .map(|node| StopRef {
                route: node.route.clone(),
                stop_index: node.stop_index,
            })
            .collect()
    }
}

// ============================================================================
// Vehicle Feed
// ============================================================================

/// Latest-fix-per-vehicle position feed.
///
/// Fleet sizes here are a handful of minibuses, so the proximity queries are
/// plain scans over the latest fixes.
#[derive(Clone, Default)]
pub struct StaticVehicleFeed {
    latest: HashMap<VehicleIdentifier, VehicleFix>,
}

impl StaticVehicleFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fixes(fixes: impl IntoIterator<Item = VehicleFix>) -> Self {
        let mut feed = Self::new();
        for fix in fixes {
            feed.record(fix);
        }
        feed
    }

    /// Record a fix, keeping only the most recent one per vehicle. Fixes
    /// older than the stored one are dropped (feeds replay out of order
    /// after connectivity gaps).
    pub fn record(&mut self, fix: VehicleFix) {
        match self.latest.get(&fix.vehicle_id) {
            Some(existing) if existing.observed_at > fix.observed_at => {}
            _ => {
                self.latest.insert(fix.vehicle_id.clone(), fix);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.latest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.latest.is_empty()
    }
}

impl VehiclePositions for StaticVehicleFeed {
    fn latest_fix(&self, vehicle_id: &VehicleIdentifier) -> Option<VehicleFix> {
        self.latest.get(vehicle_id).cloned()
    }

    fn all_latest(&self) -> Vec<VehicleFix> {
        self.latest.values().cloned().collect()
    }

    fn vehicles_within(&self, point: Point, radius_m: f64) -> Vec<(VehicleFix, f64)> {
        if radius_m <= 0.0 || !radius_m.is_finite() {
            return Vec::new();
        }

        let mut rows: Vec<(VehicleFix, f64)> = self
            .latest
            .values()
            .filter_map(|fix| {
                let d = distance_meters(point, fix.position);
                (d <= radius_m).then(|| (fix.clone(), d))
            })
            .collect();
        rows.sort_by(|a, b| a.1.total_cmp(&b.1));
        rows
    }

    fn nearest_vehicles(&self, point: Point, k: usize) -> Vec<(VehicleFix, f64)> {
        let mut rows: Vec<(VehicleFix, f64)> = self
            .latest
            .values()
            .map(|fix| (fix.clone(), distance_meters(point, fix.position)))
            .collect();
        rows.sort_by(|a, b| a.1.total_cmp(&b.1));
        rows.truncate(k);
        rows
    }
}
