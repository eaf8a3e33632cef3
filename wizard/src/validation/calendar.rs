//! Calendar days for grouping meal sessions.
//!
//! A day is resolved per timestamp with the zone's own rules, so a session in
//! January and one in July each get the offset in force at their own instant.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::fmt;

/// Zone whose midnight-to-midnight days group meal sessions
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CalendarZone {
    /// The host's local time zone, daylight saving included
    #[default]
    Local,
    /// A named IANA zone such as `Europe/Berlin`
    Named(Tz),
    /// A constant offset; no daylight saving
    Fixed(chrono::FixedOffset),
}

impl CalendarZone {
    /// UTC days
    #[must_use]
    pub fn utc() -> Self {
        Self::Named(Tz::UTC)
    }

    /// Calendar day of `ts`
    #[must_use]
    pub fn day(&self, ts: DateTime<Utc>) -> NaiveDate {
        match self {
            Self::Local => day_in(ts, &Local),
            Self::Named(tz) => day_in(ts, tz),
            Self::Fixed(offset) => day_in(ts, offset),
        }
    }

    /// First instant of `day`, or `None` if the zone cannot place it
    #[must_use]
    pub fn start_of_day(&self, day: NaiveDate) -> Option<DateTime<Utc>> {
        match self {
            Self::Local => start_of_day_in(day, &Local),
            Self::Named(tz) => start_of_day_in(day, tz),
            Self::Fixed(offset) => start_of_day_in(day, offset),
        }
    }

    /// Last millisecond of the calendar day containing `ts`
    ///
    /// One millisecond before the next day starts, which is 23:59:59.999 local
    /// on ordinary days and also holds across a daylight saving change.
    #[must_use]
    pub fn end_of_day(&self, ts: DateTime<Utc>) -> DateTime<Utc> {
        let Some(next) = self.day(ts).succ_opt() else {
            return DateTime::<Utc>::MAX_UTC;
        };
        let next_start = self
            .start_of_day(next)
            .unwrap_or_else(|| next.and_time(NaiveTime::MIN).and_utc());
        next_start - Duration::milliseconds(1)
    }
}

impl fmt::Display for CalendarZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("local"),
            Self::Named(tz) => write!(f, "{}", tz.name()),
            Self::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}

fn day_in<Z: TimeZone>(ts: DateTime<Utc>, zone: &Z) -> NaiveDate {
    ts.with_timezone(zone).date_naive()
}

/// Midnight, or the end of a daylight saving gap that swallows it
fn start_of_day_in<Z: TimeZone>(day: NaiveDate, zone: &Z) -> Option<DateTime<Utc>> {
    let midnight = day.and_time(NaiveTime::MIN);
    (0..=4).find_map(|half_hours| {
        let local = midnight + Duration::minutes(30 * half_hours);
        zone.from_local_datetime(&local)
            .earliest()
            .map(|start| start.with_timezone(&Utc))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use chrono_tz::{America::Sao_Paulo, Europe::Berlin};

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0)
            .single()
            .unwrap_or_default()
    }

    #[test]
    fn named_zone_uses_the_offset_of_each_instant() {
        let berlin = CalendarZone::Named(Berlin);
        // 22:30 UTC is 00:30 the next day in summer, 23:30 the same day in winter
        assert_eq!(
            berlin.day(utc(2026, 7, 10, 22, 30)),
            NaiveDate::from_ymd_opt(2026, 7, 11).unwrap_or_default()
        );
        assert_eq!(
            berlin.day(utc(2027, 1, 10, 22, 30)),
            NaiveDate::from_ymd_opt(2027, 1, 10).unwrap_or_default()
        );
    }

    #[test]
    fn end_of_day_on_spring_forward() {
        // 2025-03-30 begins in CET and ends in CEST
        let berlin = CalendarZone::Named(Berlin);
        let eod = berlin.end_of_day(utc(2025, 3, 30, 0, 0));
        assert_eq!(eod, utc(2025, 3, 30, 21, 59) + Duration::milliseconds(59_999));
    }

    #[test]
    fn end_of_day_on_fall_back() {
        // 2025-10-26 begins in CEST and ends in CET
        let berlin = CalendarZone::Named(Berlin);
        let eod = berlin.end_of_day(utc(2025, 10, 26, 0, 0));
        assert_eq!(eod, utc(2025, 10, 26, 22, 59) + Duration::milliseconds(59_999));
    }

    #[test]
    fn midnight_inside_a_gap() {
        // Clocks jumped from 00:00 to 01:00 on 2018-11-04
        let zone = CalendarZone::Named(Sao_Paulo);
        let start = zone.start_of_day(NaiveDate::from_ymd_opt(2018, 11, 4).unwrap_or_default());
        assert_eq!(start, Some(utc(2018, 11, 4, 3, 0)));
        assert_eq!(
            zone.end_of_day(utc(2018, 11, 3, 15, 0)),
            utc(2018, 11, 4, 2, 59) + Duration::milliseconds(59_999)
        );
    }

    #[test]
    fn fixed_offset_ignores_daylight_saving() {
        let plus_two = FixedOffset::east_opt(2 * 3600).map(CalendarZone::Fixed);
        assert_eq!(
            plus_two.map(|zone| zone.day(utc(2027, 1, 10, 22, 30))),
            NaiveDate::from_ymd_opt(2027, 1, 11)
        );
    }

    #[test]
    fn display_names_the_zone() {
        assert_eq!(CalendarZone::Named(Berlin).to_string(), "Europe/Berlin");
        assert_eq!(CalendarZone::Local.to_string(), "local");
    }
}
