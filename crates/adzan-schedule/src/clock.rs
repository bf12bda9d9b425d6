//! `"HH:MM"` parsing and countdown formatting.

use adzan_types::format_remaining;
use chrono::{NaiveDate, NaiveDateTime, Timelike};

/// Parses `"HH:MM"` into `(hour, minute)`.
///
/// Providers occasionally append seconds (`"04:30:00"`) or a zone suffix
/// (`"04:30 WIB"`); anything after the minute digits is ignored.
pub fn parse_hour_minute(s: &str) -> Option<(u32, u32)> {
    let mut parts = s.trim().split(':');
    let hour = leading_number(parts.next()?)?;
    let minute = leading_number(parts.next()?)?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some((hour, minute))
}

fn leading_number(part: &str) -> Option<u32> {
    let part = part.trim_start();
    let end = part
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(part.len());
    if end == 0 {
        return None;
    }
    part[..end].parse().ok()
}

/// `"HH:MM"` on the given calendar day, seconds zeroed.
pub fn parse_time_for_date(s: &str, date: NaiveDate) -> Option<NaiveDateTime> {
    let (hour, minute) = parse_hour_minute(s)?;
    date.and_hms_opt(hour, minute, 0)
}

/// `"HH:MM"` on the same calendar day as `now`.
pub fn parse_time_today(s: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    parse_time_for_date(s, now.date())
}

/// Countdown text from `from` until `to`: `"Now"`, `"25 min"`, `"2h 5m"`.
pub fn countdown_label(from: NaiveDateTime, to: NaiveDateTime) -> String {
    format_remaining(to - from)
}

/// Clock face text, `"HH:MM"`.
pub fn format_hhmm(dt: NaiveDateTime) -> String {
    format!("{:02}:{:02}", dt.hour(), dt.minute())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 6).unwrap()
    }

    #[test]
    fn test_parse_valid() {
        let t = parse_time_for_date("04:30", day()).unwrap();
        assert_eq!(t, day().and_hms_opt(4, 30, 0).unwrap());
        assert_eq!(parse_hour_minute("4:05"), Some((4, 5)));
        assert_eq!(parse_hour_minute("23:59"), Some((23, 59)));
    }

    #[test]
    fn test_parse_ignores_trailing_noise() {
        assert_eq!(parse_hour_minute("04:30:45"), Some((4, 30)));
        assert_eq!(parse_hour_minute(" 18:02 WIB"), Some((18, 2)));
    }

    #[test]
    fn test_parse_invalid() {
        for s in ["", "  ", "abc", "24:00", "12:60", "12", ":30", "12:", "-1:30"] {
            assert_eq!(parse_time_for_date(s, day()), None, "input {:?}", s);
        }
    }

    #[test]
    fn test_parse_today_uses_now_date() {
        let now = day().and_hms_opt(13, 7, 42).unwrap();
        let t = parse_time_today("15:15", now).unwrap();
        assert_eq!(t.date(), now.date());
        assert_eq!(t.second(), 0);
    }

    #[test]
    fn test_countdown_label() {
        let now = day().and_hms_opt(13, 0, 0).unwrap();
        assert_eq!(countdown_label(now, day().and_hms_opt(15, 15, 0).unwrap()), "2h 15m");
        assert_eq!(countdown_label(now, day().and_hms_opt(13, 40, 30).unwrap()), "40 min");
        assert_eq!(countdown_label(now, now), "Now");
    }

    #[test]
    fn test_format_hhmm() {
        assert_eq!(format_hhmm(day().and_hms_opt(4, 5, 59).unwrap()), "04:05");
    }
}
