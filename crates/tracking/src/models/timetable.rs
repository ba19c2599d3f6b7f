//! Schedule-cycle resolution for multi-run timetables.
//!
//! Every stop on a route carries its own list of scheduled times-of-day.
//! Buses run several trips per day, so "the next time at this stop" must be
//! answered consistently across stops: each stop independently picking its own
//! next time after now can make a later stop look earlier than an earlier stop
//! because they picked times from different runs. The resolver derives a
//! single cycle index `k` ("the k-th run of the day") from the head and tail
//! stop timetables, and every stop then reports its k-th time.

use chrono::NaiveTime;

/// Parse raw `HH:MM` strings into times, silently dropping anything that does
/// not parse. Dropping everything is a legitimate outcome (an
/// under-configured route) and surfaces as the empty-schedule case in
/// [`resolve_cycle_index`].
pub fn parse_schedule<S: AsRef<str>>(raw: &[S]) -> Vec<NaiveTime> {
    raw.iter()
        .filter_map(|entry| {
            let entry = entry.as_ref().trim();
            match NaiveTime::parse_from_str(entry, "%H:%M") {
                Ok(t) => Some(t),
                Err(_) => {
                    tracing::debug!(entry, "dropping unparseable timetable entry");
                    None
                }
            }
        })
        .collect()
}

/// Determine which scheduled run of the day is "current".
///
/// `head` and `tail` are the timetables of the route's first and last stop in
/// the chosen direction. Both are truncated to the shorter length `L` so that
/// uneven run counts cannot index out of range. The policy, in order:
///
/// 1. the first head time not yet passed,
/// 2. else the first tail time not yet passed (the run is underway),
/// 3. else `L - 1` (missed everything, show the last run).
///
/// Returns `None` when either timetable is empty (`L == 0`); callers then
/// render no time for any stop.
pub fn resolve_cycle_index(
    head: &[NaiveTime],
    tail: &[NaiveTime],
    now: NaiveTime,
) -> Option<usize> {
    let len = head.len().min(tail.len());
    if len == 0 {
        return None;
    }
    let head = &head[..len];
    let tail = &tail[..len];

    if let Some(i) = head.iter().position(|t| now <= *t) {
        return Some(i);
    }
    if let Some(i) = tail.iter().position(|t| now <= *t) {
        return Some(i);
    }
    Some(len - 1)
}

/// The k-th time at a stop, or the last available one when this stop has
/// fewer runs than the head/tail-derived cycle index. `None` only for stops
/// with no schedule at all.
pub fn lookup_time_for_stop(schedule: &[NaiveTime], k: usize) -> Option<NaiveTime> {
    if schedule.is_empty() {
        return None;
    }
    Some(schedule[k.min(schedule.len() - 1)])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    fn times(raw: &[&str]) -> Vec<NaiveTime> {
        raw.iter().map(|s| t(s)).collect()
    }

    #[test]
    fn test_parse_drops_invalid_entries() {
        let parsed = parse_schedule(&["07:00", "not a time", "25:61", " 08:30 ", ""]);
        assert_eq!(parsed, times(&["07:00", "08:30"]));
    }

    #[test]
    fn test_early_morning_picks_first_run() {
        let head = times(&["07:00", "09:00"]);
        let tail = times(&["07:30", "09:30"]);
        assert_eq!(resolve_cycle_index(&head, &tail, t("06:00")), Some(0));
    }

    #[test]
    fn test_mid_run_falls_through_to_tail() {
        // 07:10 is past the first departure but before the first arrival at
        // the tail stop, so the first run is still current.
        let head = times(&["07:00", "09:00"]);
        let tail = times(&["07:30", "09:30"]);
        assert_eq!(resolve_cycle_index(&head, &tail, t("07:10")), Some(0));
    }

    #[test]
    fn test_end_of_day_returns_last_run() {
        let head = times(&["07:00", "09:00"]);
        let tail = times(&["07:30", "09:30"]);
        assert_eq!(resolve_cycle_index(&head, &tail, t("23:00")), Some(1));
    }

    #[test]
    fn test_uneven_lengths_truncated() {
        // Tail has one fewer run; index must stay within the shared prefix.
        let head = times(&["07:00", "09:00", "11:00"]);
        let tail = times(&["07:30", "09:30"]);
        assert_eq!(resolve_cycle_index(&head, &tail, t("23:00")), Some(1));
        assert_eq!(resolve_cycle_index(&head, &tail, t("10:00")), Some(1));
    }

    #[test]
    fn test_cycle_index_always_in_bounds() {
        let head = times(&["06:00", "10:00", "14:00", "18:00"]);
        let tail = times(&["06:45", "10:45", "14:45", "18:45"]);
        for hour in 0..24 {
            let now = NaiveTime::from_hms_opt(hour, 0, 0).unwrap();
            let k = resolve_cycle_index(&head, &tail, now).unwrap();
            assert!(k < 4, "k={} out of bounds at hour {}", k, hour);
        }
    }

    #[test]
    fn test_empty_schedule_unavailable() {
        let tail = times(&["07:30"]);
        assert_eq!(resolve_cycle_index(&[], &tail, t("08:00")), None);
        assert_eq!(resolve_cycle_index(&tail, &[], t("08:00")), None);
        assert_eq!(resolve_cycle_index(&[], &[], t("08:00")), None);
    }

    #[test]
    fn test_lookup_clamps_to_last_entry() {
        let schedule = times(&["08:00"]);
        assert_eq!(lookup_time_for_stop(&schedule, 5), Some(t("08:00")));
        assert_eq!(lookup_time_for_stop(&schedule, 0), Some(t("08:00")));
        assert_eq!(lookup_time_for_stop(&[], 0), None);
    }
}
