//! Presentation-facing rollups: one row per running vehicle, and per-stop
//! next-time boards.
//!
//! These are the thin adapters between the providers and the matching core.
//! They fetch nothing themselves; the caller supplies the day's duty roster
//! and the two providers.

use chrono::{NaiveDateTime, NaiveTime};

use crate::identifiers::{RouteIdentifier, StopIdentifier, VehicleIdentifier};
use crate::models::timetable::{lookup_time_for_stop, resolve_cycle_index};
use crate::models::types::{Direction, Result, RouteDirection, TrackingError};
use crate::provider::traits::{StopCatalog, VehiclePositions};

/// One row of the day's duty roster: which vehicle serves which
/// route-direction.
#[derive(Clone, Debug)]
pub struct Duty {
    pub route_id: RouteIdentifier,
    pub direction: Direction,
    pub vehicle_id: VehicleIdentifier,
}

impl Duty {
    pub fn new(route_id: RouteIdentifier, direction: Direction, vehicle_id: VehicleIdentifier) -> Self {
        Self {
            route_id,
            direction,
            vehicle_id,
        }
    }

    /// Build a duty from raw roster fields, normalizing the direction label.
    pub fn from_raw(
        route_id: impl AsRef<str>,
        raw_direction: Option<&str>,
        vehicle_id: impl AsRef<str>,
    ) -> Self {
        Self {
            route_id: RouteIdentifier::new(route_id),
            direction: Direction::normalize(raw_direction),
            vehicle_id: VehicleIdentifier::new(vehicle_id),
        }
    }
}

/// Live status row for one duty. Fields are `None` when the corresponding
/// upstream data is missing: a vehicle with no fix yet renders as "not yet
/// departed" rather than disappearing from the list.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleSummary {
    pub route_id: RouteIdentifier,
    pub direction: Direction,
    pub license_plate: VehicleIdentifier,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub nearest_stop_name: Option<String>,
    pub nearest_distance_m: Option<f64>,
    pub nearest_sequence_index: Option<u32>,
    pub observed_at: Option<NaiveDateTime>,
}

impl VehicleSummary {
    fn empty(duty: &Duty) -> Self {
        Self {
            route_id: duty.route_id.clone(),
            direction: duty.direction,
            license_plate: duty.vehicle_id.clone(),
            longitude: None,
            latitude: None,
            nearest_stop_name: None,
            nearest_distance_m: None,
            nearest_sequence_index: None,
            observed_at: None,
        }
    }
}

/// Summarize one duty: latest fix plus nearest stop on the duty's
/// route-direction. Missing fix or missing stop data degrade to `None`
/// fields, never to errors.
pub fn summarize_duty(
    duty: &Duty,
    catalog: &dyn StopCatalog,
    positions: &dyn VehiclePositions,
) -> VehicleSummary {
    let mut summary = VehicleSummary::empty(duty);

    let Some(fix) = positions.latest_fix(&duty.vehicle_id) else {
        return summary;
    };
    summary.longitude = Some(fix.position.x());
    summary.latitude = Some(fix.position.y());
    summary.observed_at = Some(fix.observed_at);

    let Some(route) = catalog.route_direction(&duty.route_id, duty.direction) else {
        return summary;
    };
    if let Some(matched) = route.nearest_stop(fix.position) {
        summary.nearest_stop_name = Some(matched.stop.stop_name.to_string());
        summary.nearest_distance_m = Some(matched.distance_meters);
        summary.nearest_sequence_index = Some(matched.stop.sequence_index);
    }

    summary
}

/// Summarize every duty on the roster, one row each, in roster order.
pub fn summarize_all(
    duties: &[Duty],
    catalog: &dyn StopCatalog,
    positions: &dyn VehiclePositions,
) -> Vec<VehicleSummary> {
    duties
        .iter()
        .map(|duty| summarize_duty(duty, catalog, positions))
        .collect()
}

/// Detailed status for a single route query. Unlike [`summarize_duty`] the
/// caller asked about this route specifically, so missing upstream data is
/// reported as an error instead of a row of nulls.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteStatus {
    pub route_id: RouteIdentifier,
    pub direction: Direction,
    pub license_plate: VehicleIdentifier,
    pub longitude: f64,
    pub latitude: f64,
    pub observed_at: NaiveDateTime,
    pub nearest_stop_name: String,
    pub nearest_distance_m: f64,
    pub nearest_sequence_index: u32,
    pub nearest_stop_id: Option<StopIdentifier>,
    pub total_stops: usize,
}

pub fn route_status(
    duty: &Duty,
    catalog: &dyn StopCatalog,
    positions: &dyn VehiclePositions,
) -> Result<RouteStatus> {
    let route = catalog
        .route_direction(&duty.route_id, duty.direction)
        .ok_or_else(|| TrackingError::RouteNotFound(duty.route_id.clone()))?;
    let fix = positions
        .latest_fix(&duty.vehicle_id)
        .ok_or_else(|| TrackingError::VehicleNotFound(duty.vehicle_id.clone()))?;
    // Empty stop list reads the same as an unconfigured route here.
    let matched = route
        .nearest_stop(fix.position)
        .ok_or_else(|| TrackingError::RouteNotFound(duty.route_id.clone()))?;

    Ok(RouteStatus {
        route_id: duty.route_id.clone(),
        direction: duty.direction,
        license_plate: duty.vehicle_id.clone(),
        longitude: fix.position.x(),
        latitude: fix.position.y(),
        observed_at: fix.observed_at,
        nearest_stop_name: matched.stop.stop_name.to_string(),
        nearest_distance_m: matched.distance_meters,
        nearest_sequence_index: matched.stop.sequence_index,
        nearest_stop_id: matched.stop.stop_id.clone(),
        total_stops: route.stops().len(),
    })
}

/// One stop's entry on the departure board.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StopDeparture {
    pub stop_name: String,
    pub next_time: Option<NaiveTime>,
}

/// Per-stop next times for the currently scheduled run.
///
/// The cycle index is resolved once from the head and tail stop timetables
/// and applied to every stop, so the board never shows times from two
/// different runs. When the resolver signals no schedule, every stop's
/// `next_time` is `None`.
pub fn departure_board(route: &RouteDirection, now: NaiveTime) -> Vec<StopDeparture> {
    let head = route.head_stop().map(|s| s.schedule.as_slice()).unwrap_or(&[]);
    let tail = route.tail_stop().map(|s| s.schedule.as_slice()).unwrap_or(&[]);
    let cycle = resolve_cycle_index(head, tail, now);

    route
        .stops()
        .iter()
        .map(|stop| StopDeparture {
            stop_name: stop.stop_name.to_string(),
            next_time: cycle.and_then(|k| lookup_time_for_stop(&stop.schedule, k)),
        })
        .collect()
}
