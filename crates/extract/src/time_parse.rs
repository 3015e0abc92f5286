// ABOUTME: Date and time parsing for fund pages published in US Eastern time.
// ABOUTME: Converts Eastern wall-clock timestamps to a fixed target offset and normalizes dates.

use chrono::{
    Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc,
    Weekday,
};
use tracing::warn;

/// Output layout for timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Output layout for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const EST_OFFSET_SECS: i32 = -5 * 3600;
const EDT_OFFSET_SECS: i32 = -4 * 3600;

/// Time-of-day layouts seen in "As of" lines.
const TIME_FORMATS: [&str; 4] = ["%H:%M:%S", "%H:%M", "%I:%M%p", "%I:%M:%S%p"];

/// Parses a time-of-day token.
pub fn parse_time_of_day(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
}

/// Parses a US `MM/DD/YYYY` date token by reassembling it as `YYYY-MM-DD`.
pub fn parse_us_date(s: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = s.trim().split('/').collect();
    let [month, day, year] = parts.as_slice() else {
        return None;
    };
    let iso = format!("{}-{}-{}", year, month, day);
    NaiveDate::parse_from_str(&iso, DATE_FORMAT).ok()
}

/// Returns the UTC offset US Eastern time observes at the given local wall-clock time.
///
/// Daylight time runs from the second Sunday of March 02:00 to the first
/// Sunday of November 02:00 (the rule in force since 2007). Times inside the
/// repeated November hour resolve to daylight time.
pub fn us_eastern_offset(local: NaiveDateTime) -> FixedOffset {
    let secs = if is_eastern_dst(local).unwrap_or(false) {
        EDT_OFFSET_SECS
    } else {
        EST_OFFSET_SECS
    };
    fixed_offset(secs)
}

fn is_eastern_dst(local: NaiveDateTime) -> Option<bool> {
    let two_am = NaiveTime::from_hms_opt(2, 0, 0)?;
    let start = nth_weekday(local.year(), 3, Weekday::Sun, 2)?.and_time(two_am);
    let end = nth_weekday(local.year(), 11, Weekday::Sun, 1)?.and_time(two_am);
    Some(local >= start && local < end)
}

/// Interprets `local` as US Eastern wall-clock time and renders it at `target`.
pub fn eastern_to_target(local: NaiveDateTime, target: FixedOffset) -> Option<String> {
    let offset = us_eastern_offset(local);
    let at_source = offset.from_local_datetime(&local).single()?;
    Some(at_source.with_timezone(&target).format(TIMESTAMP_FORMAT).to_string())
}

/// Builds a fixed offset from seconds east of UTC, falling back to UTC when out of range.
pub fn fixed_offset(secs: i32) -> FixedOffset {
    FixedOffset::east_opt(secs).unwrap_or_else(|| {
        warn!(secs, "UTC offset out of range; using UTC");
        Utc.fix()
    })
}

/// Parses the calendar dates printed in fund profiles.
///
/// `DD-MM-YYYY` is reordered to `YYYY-MM-DD` when its third part has at
/// least four digits; `YYYY-MM-DD` and `MM/DD/YYYY` are accepted as-is.
pub fn parse_profile_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let parts: Vec<&str> = s.split('-').collect();
    if parts.len() == 3 && parts[2].chars().filter(|c| c.is_ascii_digit()).count() >= 4 {
        let iso = format!("{}-{}-{}", parts[2], parts[1], parts[0]);
        return NaiveDate::parse_from_str(&iso, DATE_FORMAT).ok();
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .or_else(|| parse_us_date(s))
}

fn nth_weekday(year: i32, month: u32, weekday: Weekday, n: u32) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let shift = (7 + weekday.num_days_from_monday() - first.weekday().num_days_from_monday()) % 7;
    Some(first + Duration::days(i64::from(shift + 7 * (n - 1))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_nth_weekday() {
        // March 2014: the 1st is a Saturday, second Sunday is the 9th
        assert_eq!(
            nth_weekday(2014, 3, Weekday::Sun, 2),
            NaiveDate::from_ymd_opt(2014, 3, 9)
        );
        // November 2014: the 1st is a Saturday, first Sunday is the 2nd
        assert_eq!(
            nth_weekday(2014, 11, Weekday::Sun, 1),
            NaiveDate::from_ymd_opt(2014, 11, 2)
        );
    }

    #[test]
    fn test_eastern_offset_switches_with_dst() {
        assert_eq!(us_eastern_offset(at(2014, 1, 15, 12, 0)).local_minus_utc(), -5 * 3600);
        assert_eq!(us_eastern_offset(at(2014, 7, 15, 12, 0)).local_minus_utc(), -4 * 3600);
        assert_eq!(us_eastern_offset(at(2014, 3, 9, 1, 59)).local_minus_utc(), -5 * 3600);
        assert_eq!(us_eastern_offset(at(2014, 3, 9, 3, 0)).local_minus_utc(), -4 * 3600);
        assert_eq!(us_eastern_offset(at(2014, 11, 2, 2, 0)).local_minus_utc(), -5 * 3600);
    }

    #[test]
    fn test_eastern_to_target_summer() {
        let out = eastern_to_target(at(2014, 10, 17, 16, 0), fixed_offset(7 * 3600));
        // 16:00 EDT = 20:00 UTC = 03:00 next day at UTC+7
        assert_eq!(out.as_deref(), Some("2014-10-18 03:00:00"));
    }

    #[test]
    fn test_eastern_to_target_winter() {
        let out = eastern_to_target(at(2014, 12, 1, 9, 30), fixed_offset(7 * 3600));
        // 09:30 EST = 14:30 UTC = 21:30 at UTC+7
        assert_eq!(out.as_deref(), Some("2014-12-01 21:30:00"));
    }

    #[test]
    fn test_parse_time_of_day() {
        assert_eq!(parse_time_of_day("16:00:00"), NaiveTime::from_hms_opt(16, 0, 0));
        assert_eq!(parse_time_of_day("16:00"), NaiveTime::from_hms_opt(16, 0, 0));
        assert_eq!(parse_time_of_day("4:00PM"), NaiveTime::from_hms_opt(16, 0, 0));
        assert_eq!(parse_time_of_day("noon"), None);
    }

    #[test]
    fn test_parse_us_date() {
        assert_eq!(parse_us_date("10/17/2014"), NaiveDate::from_ymd_opt(2014, 10, 17));
        assert_eq!(parse_us_date("17/10/2014"), None);
        assert_eq!(parse_us_date("2014-10-17"), None);
    }

    #[test]
    fn test_parse_profile_date() {
        assert_eq!(parse_profile_date("13-02-2009"), NaiveDate::from_ymd_opt(2009, 2, 13));
        assert_eq!(parse_profile_date("2009-02-13"), NaiveDate::from_ymd_opt(2009, 2, 13));
        assert_eq!(parse_profile_date("02/13/2009"), NaiveDate::from_ymd_opt(2009, 2, 13));
        assert_eq!(parse_profile_date("-"), None);
        assert_eq!(parse_profile_date("31-02-2009"), None);
    }
}
