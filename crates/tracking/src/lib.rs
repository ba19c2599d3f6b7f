//! # minibus-tracking
//!
//! Live vehicle tracking core for a minibus fleet: nearest-stop matching and
//! schedule-cycle resolution over direction-filtered stop lists.
//!
//! ## Features
//!
//! - **Pure matching core**: geodesic distance, nearest-stop search and the
//!   schedule-cycle resolver are stateless functions over their arguments
//! - **Explicit coordinate boundary**: raw X/Y pairs from position feeds are
//!   validated (and swap-corrected) once, at the edge
//! - **Spatial queries**: R-tree backed radius and nearest-N stop lookups
//! - **Pluggable providers**: stop catalogs and position feeds sit behind
//!   traits, so caching or database-backed implementations drop in
//!
//! ## Example
//!
//! ```
//! use minibus_tracking::prelude::*;
//! use geo::Point;
//!
//! let route = RouteDirection::new(
//!     RouteIdentifier::new("23"),
//!     Direction::normalize(Some("去程")),
//!     vec![
//!         Stop::new("harbor", Point::new(121.6032, 23.9930), 0, parse_schedule(&["07:00"])),
//!         Stop::new("market", Point::new(121.6178, 23.9929), 1, parse_schedule(&["07:30"])),
//!     ],
//! );
//!
//! // A fix a few hundred meters from the market stop.
//! let nearest = route.nearest_stop(Point::new(121.6150, 23.9929)).unwrap();
//! assert_eq!(&*nearest.stop.stop_name, "market");
//! assert!(nearest.distance_meters < 400.0);
//! ```

pub mod geodesic;
pub mod identifiers;
pub mod live;
pub mod matcher;
pub mod models;
pub mod provider;
pub mod spatial;

// Re-exports for convenience
pub mod prelude {
    pub use crate::geodesic::distance_meters;
    pub use crate::identifiers::*;
    pub use crate::live::{
        departure_board, route_status, summarize_all, summarize_duty, Duty, RouteStatus,
        StopDeparture, VehicleSummary,
    };
    pub use crate::matcher::{find_nearest, MatchResult};
    pub use crate::models::timetable::{lookup_time_for_stop, parse_schedule, resolve_cycle_index};
    pub use crate::models::types::*;
    pub use crate::provider::{
        static_provider::{StaticStopCatalog, StaticVehicleFeed},
        traits::{StopCatalog, StopRef, VehiclePositions},
    };
}

pub use prelude::*;
