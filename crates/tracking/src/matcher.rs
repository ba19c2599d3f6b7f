//! Nearest-stop matching for live vehicle fixes.

use geo::Point;

use crate::geodesic::distance_meters;
use crate::models::types::{RouteDirection, Stop};

/// The closest stop to a vehicle position, with the geodesic distance to it.
#[derive(Clone, Copy, Debug)]
pub struct MatchResult<'a> {
    pub stop: &'a Stop,
    pub distance_meters: f64,
}

/// Find the stop closest to `position`.
///
/// `stops` must already be filtered to the vehicle's route and canonical
/// direction; this function does no filtering of its own. The scan is O(n),
/// which is plenty for routes of a few dozen stops.
///
/// On an exact distance tie the stop appearing earliest in the input wins,
/// so with the usual sorted-by-sequence input the lowest `sequence_index`
/// is returned. An empty list yields `None`: a route with no stops
/// configured for a direction is an expected condition, not an error.
pub fn find_nearest(position: Point, stops: &[Stop]) -> Option<MatchResult<'_>> {
    let mut best: Option<MatchResult<'_>> = None;
    for stop in stops {
        let d = distance_meters(position, stop.location);
        match best {
            Some(ref current) if d >= current.distance_meters => {}
            _ => {
                best = Some(MatchResult {
                    stop,
                    distance_meters: d,
                })
            }
        }
    }
    best
}

impl RouteDirection {
    /// Closest stop on this route-direction to `position`.
    pub fn nearest_stop(&self, position: Point) -> Option<MatchResult<'_>> {
        find_nearest(position, self.stops())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geodesic::distance_meters;

    fn stops_along_equator() -> Vec<Stop> {
        vec![
            Stop::new("zero", Point::new(0.0, 0.0), 0, vec![]),
            Stop::new("one", Point::new(1.0, 0.0), 1, vec![]),
            Stop::new("two", Point::new(2.0, 0.0), 2, vec![]),
        ]
    }

    #[test]
    fn test_nearest_of_three() {
        let stops = stops_along_equator();
        let result = find_nearest(Point::new(0.9, 0.0), &stops).unwrap();
        assert_eq!(&*result.stop.stop_name, "one");
    }

    #[test]
    fn test_result_is_the_minimum() {
        let stops = stops_along_equator();
        let fix = Point::new(1.4, 0.2);
        let result = find_nearest(fix, &stops).unwrap();
        for stop in &stops {
            assert!(result.distance_meters <= distance_meters(fix, stop.location));
        }
    }

    #[test]
    fn test_empty_list_returns_none() {
        assert!(find_nearest(Point::new(0.0, 0.0), &[]).is_none());
    }

    #[test]
    fn test_tie_breaks_to_earliest() {
        // Two stops at the same location: the first in input order wins.
        let stops = vec![
            Stop::new("a", Point::new(1.0, 0.0), 0, vec![]),
            Stop::new("b", Point::new(1.0, 0.0), 1, vec![]),
        ];
        let result = find_nearest(Point::new(0.0, 0.0), &stops).unwrap();
        assert_eq!(&*result.stop.stop_name, "a");
        assert_eq!(result.stop.sequence_index, 0);
    }

    #[test]
    fn test_single_stop() {
        let stops = vec![Stop::new("only", Point::new(121.6, 23.99), 0, vec![])];
        let result = find_nearest(Point::new(121.7, 24.0), &stops).unwrap();
        assert_eq!(&*result.stop.stop_name, "only");
        assert!(result.distance_meters > 0.0);
    }
}
