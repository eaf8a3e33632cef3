//! Meal session scheduling: same-day collisions and the event's date span.
//!
//! Sessions are grouped by the calendar day of their start time in a
//! [`CalendarZone`], not by a rolling 24-hour window: 23:59 and 00:01 on
//! consecutive days belong to different days and are never compared.
//! Intersection uses the half-open rule, so a session ending exactly when
//! another begins does not collide with it.

use super::calendar::CalendarZone;
use crate::types::MealSession;
use chrono::{DateTime, Utc};

/// Positions (0-based) of the first pair of complete sessions that collide
#[must_use]
pub fn find_overlap(sessions: &[MealSession], zone: &CalendarZone) -> Option<(usize, usize)> {
    let complete: Vec<(usize, DateTime<Utc>, DateTime<Utc>)> = sessions
        .iter()
        .enumerate()
        .filter_map(|(i, session)| session.interval().map(|(begin, end)| (i, begin, end)))
        .collect();

    for (n, &(i, a_begin, a_end)) in complete.iter().enumerate() {
        let day = zone.day(a_begin);
        for &(j, b_begin, b_end) in &complete[n + 1..] {
            if zone.day(b_begin) != day {
                continue;
            }
            if a_begin < b_end && a_end > b_begin {
                return Some((i, j));
            }
        }
    }

    None
}

/// True if two complete sessions on the same day intersect
#[must_use]
pub fn detect_overlap(sessions: &[MealSession], zone: &CalendarZone) -> bool {
    find_overlap(sessions, zone).is_some()
}

/// Describes every complete session that falls outside the event
///
/// A session may produce two violations (early start and late end). The end
/// bound is the last millisecond of `event_end`'s day, or of `event_start`'s
/// day when the event has no end date.
#[must_use]
pub fn validate_date_range(
    sessions: &[MealSession],
    event_start: DateTime<Utc>,
    event_end: Option<DateTime<Utc>>,
    zone: &CalendarZone,
) -> Vec<String> {
    let last_moment = zone.end_of_day(event_end.unwrap_or(event_start));
    let mut violations = Vec::new();

    for (i, session) in sessions.iter().enumerate() {
        let Some((begin, end)) = session.interval() else {
            continue;
        };
        let label = session_label(i, session);
        if begin < event_start {
            violations.push(format!("{label} starts before the event begins"));
        }
        if end > last_moment {
            violations.push(format!("{label} ends after the event's last day"));
        }
    }

    violations
}

fn session_label(index: usize, session: &MealSession) -> String {
    let name = session.name.trim();
    if name.is_empty() {
        format!("Meal session {}", index + 1)
    } else {
        format!("Meal session {} ({name})", index + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset, TimeZone};
    use chrono_tz::{Europe::Berlin, Tz};
    use proptest::prelude::*;

    const UTC: CalendarZone = CalendarZone::Named(Tz::UTC);

    fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, day, hour, minute, 0)
            .single()
            .unwrap_or_default()
    }

    fn session(name: &str, begin: DateTime<Utc>, end: DateTime<Utc>) -> MealSession {
        MealSession::new(name, Some(begin), Some(end))
    }

    #[test]
    fn lunch_sessions_overlapping_at_half_past() {
        let a = session("A", at(10, 12, 0), at(10, 13, 0));
        let b = session("B", at(10, 12, 30), at(10, 13, 30));
        assert!(detect_overlap(&[a, b], &UTC));
    }

    #[test]
    fn touching_sessions_do_not_overlap() {
        let a = session("A", at(10, 12, 0), at(10, 13, 0));
        let b = session("B", at(10, 13, 0), at(10, 13, 30));
        assert!(!detect_overlap(&[a, b], &UTC));
    }

    #[test]
    fn sessions_on_consecutive_days_are_not_compared() {
        let late = session("Late", at(10, 23, 59), at(11, 0, 30));
        let early = session("Early", at(11, 0, 1), at(11, 1, 0));
        assert!(!detect_overlap(&[late, early], &UTC));
    }

    #[test]
    fn calendar_day_follows_the_zone() {
        // 23:30 and 00:10 UTC fall on the same day two hours east
        let a = session("A", at(10, 23, 30), at(11, 0, 30));
        let b = session("B", at(11, 0, 10), at(11, 0, 40));
        assert!(!detect_overlap(&[a.clone(), b.clone()], &UTC));

        let east = FixedOffset::east_opt(2 * 3600).map(CalendarZone::Fixed);
        assert!(east.is_some_and(|zone| detect_overlap(&[a, b], &zone)));
    }

    fn berlin(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Berlin
            .with_ymd_and_hms(y, mo, d, h, mi, 0)
            .single()
            .map(|local| local.with_timezone(&Utc))
            .unwrap_or_default()
    }

    #[test]
    fn winter_sessions_across_midnight_use_winter_days() {
        // Local 23:30 and 00:10 in January; a summer offset would put both on the 11th
        let a = session("A", berlin(2027, 1, 10, 23, 30), berlin(2027, 1, 11, 0, 30));
        let b = session("B", berlin(2027, 1, 11, 0, 10), berlin(2027, 1, 11, 0, 40));
        assert!(!detect_overlap(&[a, b], &CalendarZone::Named(Berlin)));
    }

    #[test]
    fn sessions_around_the_autumn_clock_change() {
        let zone = CalendarZone::Named(Berlin);
        // Saturday 23:30 CEST to Sunday 00:30 CEST, Sunday 00:10 CEST onwards
        let late = session("Late", berlin(2025, 10, 25, 23, 30), berlin(2025, 10, 26, 0, 30));
        let early = session("Early", berlin(2025, 10, 26, 0, 10), berlin(2025, 10, 26, 1, 0));
        assert!(!detect_overlap(&[late, early.clone()], &zone));

        // Both start after midnight on the night the clocks go back
        let after = session("After", berlin(2025, 10, 26, 0, 50), berlin(2025, 10, 26, 4, 0));
        assert_eq!(find_overlap(&[early, after], &zone), Some((0, 1)));
    }

    #[test]
    fn winter_event_day_ends_at_local_midnight() {
        let zone = CalendarZone::Named(Berlin);
        let start = berlin(2027, 1, 10, 18, 0);
        let dinner = session("Dinner", berlin(2027, 1, 10, 21, 0), berlin(2027, 1, 10, 23, 30));
        assert!(validate_date_range(&[dinner], start, None, &zone).is_empty());

        let nightcap = session("Nightcap", berlin(2027, 1, 10, 23, 0), berlin(2027, 1, 11, 0, 15));
        assert_eq!(
            validate_date_range(&[nightcap], start, None, &zone),
            vec!["Meal session 1 (Nightcap) ends after the event's last day".to_string()]
        );
    }

    #[test]
    fn incomplete_sessions_are_skipped() {
        let a = session("A", at(10, 12, 0), at(10, 13, 0));
        let b = MealSession::new("B", Some(at(10, 12, 15)), None);
        assert!(!detect_overlap(&[a, b], &UTC));
    }

    #[test]
    fn find_overlap_reports_positions() {
        let sessions = [
            session("Breakfast", at(10, 8, 0), at(10, 9, 0)),
            MealSession::new("Pending", None, None),
            session("Brunch", at(10, 8, 30), at(10, 10, 0)),
        ];
        assert_eq!(find_overlap(&sessions, &UTC), Some((0, 2)));
    }

    #[test]
    fn end_of_day_is_last_millisecond() {
        let eod = UTC.end_of_day(at(10, 9, 0));
        assert_eq!(eod, at(10, 23, 59) + Duration::milliseconds(59_999));
    }

    #[test]
    fn evening_session_on_single_day_event_is_in_range() {
        let dinner = session("Dinner", at(10, 19, 0), at(10, 23, 0));
        assert!(validate_date_range(&[dinner], at(10, 9, 0), None, &UTC).is_empty());
    }

    #[test]
    fn both_violations_of_one_session_are_reported() {
        let sprawling = session("Sprawl", at(9, 12, 0), at(12, 1, 0));
        let early = session("", at(10, 7, 0), at(10, 8, 0));
        let violations =
            validate_date_range(&[sprawling, early], at(10, 9, 0), Some(at(11, 9, 0)), &UTC);

        assert_eq!(
            violations,
            vec![
                "Meal session 1 (Sprawl) starts before the event begins".to_string(),
                "Meal session 1 (Sprawl) ends after the event's last day".to_string(),
                "Meal session 2 starts before the event begins".to_string(),
            ]
        );
    }

    fn arb_session() -> impl Strategy<Value = MealSession> {
        // minutes within a three-day window, lengths up to four hours
        (0i64..3 * 24 * 60, 1i64..240).prop_map(|(start, length)| {
            let begin = at(10, 0, 0) + Duration::minutes(start);
            session("S", begin, begin + Duration::minutes(length))
        })
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(a in arb_session(), b in arb_session()) {
            prop_assert_eq!(
                detect_overlap(&[a.clone(), b.clone()], &UTC),
                detect_overlap(&[b, a], &UTC)
            );
        }

        #[test]
        fn back_to_back_sessions_never_overlap(
            start in 0i64..20 * 60,
            first in 1i64..120,
            second in 1i64..120,
        ) {
            let begin = at(10, 0, 0) + Duration::minutes(start);
            let middle = begin + Duration::minutes(first);
            let a = session("A", begin, middle);
            let b = session("B", middle, middle + Duration::minutes(second));
            prop_assert!(!detect_overlap(&[a, b], &UTC));
        }

        #[test]
        fn different_days_never_overlap(a in arb_session(), b in arb_session()) {
            let (a_begin, _) = a.interval().unwrap_or_default();
            let (b_begin, _) = b.interval().unwrap_or_default();
            prop_assume!(a_begin.date_naive() != b_begin.date_naive());
            prop_assert!(!detect_overlap(&[a, b], &UTC));
        }
    }
}
