//! R-tree nodes for spatial indexing.
//!
//! ## Two-Stage Filtering
//!
//! Radius queries use a two-stage filtering approach:
//! 1. **R-tree filter**: Euclidean distance in degree space for fast
//!    approximate filtering
//! 2. **Geodesic filter**: accurate haversine distance on the survivors
//!
//! The Euclidean stage must over-approximate, never under-approximate, so the
//! catalog pads the degree radius before querying the tree (longitude degrees
//! shrink with latitude).

use std::sync::Arc;

use geo::Point;
use rstar::{PointDistance, RTreeObject, AABB};

use crate::models::types::{RouteDirection, Stop};

/// One stop of one route-direction, positioned for R-tree lookup.
#[derive(Clone)]
pub struct StopNode {
    pub route: Arc<RouteDirection>,
    pub stop_index: usize,
    point: [f64; 2],
}

impl StopNode {
    pub fn new(route: Arc<RouteDirection>, stop_index: usize) -> Self {
        let location: Point = route.stops()[stop_index].location;
        Self {
            route,
            stop_index,
            point: [location.x(), location.y()],
        }
    }

    pub fn stop(&self) -> &Stop {
        &self.route.stops()[self.stop_index]
    }
}

impl RTreeObject for StopNode {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for StopNode {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}
