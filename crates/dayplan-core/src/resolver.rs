//! Time expression resolution.
//!
//! A single expression such as `下午 2:30`, `2:30 PM` or `14:30` is matched
//! against an ordered rule table; the first rule that matches decides the
//! qualifier. Anything outside the table is unrecognised.

use std::fmt;
use std::sync::LazyLock;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::qualifier::TimeQualifier;

/// Rule table in priority order. Every rule exposes `h` and `m`; qualified
/// rules also expose `q`.
static TIME_RULES: LazyLock<[Regex; 6]> = LazyLock::new(|| {
    [
        r"^(?P<q>上午|早上|凌晨)\s*(?P<h>[0-9]{1,2}):(?P<m>[0-9]{2})$",
        r"^(?P<q>下午|中午)\s*(?P<h>[0-9]{1,2}):(?P<m>[0-9]{2})$",
        r"^(?P<q>晚上|夜间)\s*(?P<h>[0-9]{1,2}):(?P<m>[0-9]{2})$",
        r"^(?P<h>[0-9]{1,2}):(?P<m>[0-9]{2})\s*(?P<q>AM|am)$",
        r"^(?P<h>[0-9]{1,2}):(?P<m>[0-9]{2})\s*(?P<q>PM|pm)$",
        r"^(?P<h>[0-9]{1,2}):(?P<m>[0-9]{2})$",
    ]
    .map(|pattern| Regex::new(pattern).unwrap())
});

/// A clock value in 24-hour terms, without a date.
///
/// Components are carried exactly as computed from the text and are not
/// range-checked; see [`ResolvedTime::on`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTime {
    pub hour: u32,
    pub minute: u32,
    /// The qualifier that produced this value.
    pub qualifier: TimeQualifier,
}

impl ResolvedTime {
    /// Projects this clock value onto `date`.
    ///
    /// Hours and minutes are added to midnight as a duration, so `25:00`
    /// lands at 01:00 on the following day and `10:75` at 11:15. Returns
    /// `None` only when the result leaves chrono's representable range.
    pub fn on(self, date: NaiveDate) -> Option<NaiveDateTime> {
        let midnight = date.and_hms_opt(0, 0, 0)?;
        let offset = Duration::hours(i64::from(self.hour)) + Duration::minutes(i64::from(self.minute));
        midnight.checked_add_signed(offset)
    }
}

impl fmt::Display for ResolvedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Resolves a single time expression into a 24-hour clock value.
pub fn resolve_time(text: &str) -> Option<ResolvedTime> {
    let cleaned = text.trim();
    let caps = TIME_RULES.iter().find_map(|rule| rule.captures(cleaned))?;

    let qualifier: TimeQualifier = caps.name("q").map_or("", |m| m.as_str()).parse().ok()?;
    let hour: u32 = caps["h"].parse().ok()?;
    let minute: u32 = caps["m"].parse().ok()?;

    Some(ResolvedTime {
        hour: qualifier.adjust_hour(hour),
        minute,
        qualifier,
    })
}

/// Resolves a time expression onto a reference date.
pub fn resolve(text: &str, reference_date: NaiveDate) -> Option<NaiveDateTime> {
    resolve_time(text)?.on(reference_date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn base() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn hour_of(text: &str) -> u32 {
        resolve_time(text)
            .unwrap_or_else(|| panic!("{text} should resolve"))
            .hour
    }

    #[test]
    fn qualifier_table_at_boundary_hours() {
        // (prefix, suffix, expected hours for 1, 11, 12)
        let cases = [
            ("凌晨 ", "", [1, 11, 12]),
            ("早上 ", "", [1, 11, 12]),
            ("上午 ", "", [1, 11, 12]),
            ("中午 ", "", [13, 23, 12]),
            ("下午 ", "", [13, 23, 12]),
            ("晚上 ", "", [13, 23, 12]),
            ("夜间 ", "", [13, 23, 12]),
            ("", " AM", [1, 11, 12]),
            ("", " am", [1, 11, 12]),
            ("", " PM", [13, 23, 12]),
            ("", " pm", [13, 23, 12]),
            ("", "", [1, 11, 12]),
        ];

        for (prefix, suffix, expected) in cases {
            for (literal, want) in [1, 11, 12].into_iter().zip(expected) {
                let text = format!("{prefix}{literal}:00{suffix}");
                assert_eq!(hour_of(&text), want, "{text}");
            }
        }
    }

    #[test]
    fn twelve_oclock_boundary() {
        assert_eq!(hour_of("下午 12:00"), 12);
        assert_eq!(hour_of("12:00 PM"), 12);
        assert_eq!(hour_of("晚上 12:00"), 12);
        assert_eq!(hour_of("中午 12:00"), 12);
    }

    #[test]
    fn am_hour_is_taken_literally() {
        // 12 AM is not mapped to midnight.
        assert_eq!(hour_of("12:00 AM"), 12);
    }

    #[test]
    fn minutes_are_kept() {
        let t = resolve_time("下午 2:30").unwrap();
        assert_eq!((t.hour, t.minute), (14, 30));
        assert_eq!(t.qualifier, TimeQualifier::Afternoon);
        assert_eq!(t.to_string(), "14:30");
    }

    #[test]
    fn qualifier_spacing_is_optional() {
        assert_eq!(hour_of("下午2:30"), 14);
        assert_eq!(hour_of("2:30PM"), 14);
        assert_eq!(hour_of("  凌晨 5:30  "), 5);
    }

    #[test]
    fn bare_clock_is_twenty_four_hour() {
        let t = resolve_time("14:30").unwrap();
        assert_eq!((t.hour, t.minute, t.qualifier), (14, 30, TimeQualifier::Bare));
    }

    #[test]
    fn unrecognised_expressions_fail() {
        for text in [
            "",
            "无效时间",
            "另一个无效时间",
            "1100",
            "11:0",
            "111:00",
            "11:00 Pm",
            "午后 3:00",
            "下午 3点",
            "3:00 PM PST",
            "１１:００",
        ] {
            assert!(resolve_time(text).is_none(), "{text:?} should not resolve");
        }
    }

    #[test]
    fn resolve_projects_onto_reference_date() {
        let dt = resolve("上午 11:00", base()).unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 1, 15));
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (11, 0, 0));
    }

    #[test]
    fn out_of_range_hour_rolls_to_next_day() {
        // Known edge case: values are not validated, they roll over.
        let dt = resolve("25:00", base()).unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2024, 1, 16).unwrap());
        assert_eq!(dt.hour(), 1);

        let dt = resolve("晚上 13:00", base()).unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2024, 1, 16).unwrap());
        assert_eq!(dt.hour(), 1);
    }

    #[test]
    fn out_of_range_minute_rolls_into_hour() {
        let dt = resolve("10:75", base()).unwrap();
        assert_eq!((dt.hour(), dt.minute()), (11, 15));
    }
}
