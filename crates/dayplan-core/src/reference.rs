//! Reference date selection for one extraction call.
//!
//! Every clock value in a call lands on the same calendar date. An embedded
//! `YYYY年M月D日` declaration wins over a caller-supplied date, which wins
//! over the clock.

use std::sync::LazyLock;

use chrono::{Duration, NaiveDate};
use regex::Regex;

use crate::clock::Clock;
use crate::types::ValidationError;

static DATE_DECLARATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]{4})年([0-9]{1,2})月([0-9]{1,2})日").unwrap());

/// A `YYYY年M月D日` declaration exactly as written, before normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateDeclaration {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl DateDeclaration {
    /// Normalizes the declaration onto the proleptic Gregorian calendar.
    ///
    /// Components are not range-checked. Starting from the first day of
    /// `year`, `month - 1` months and then `day - 1` days are added, so
    /// `2024年13月1日` is 2025-01-01, `2024年2月30日` is 2024-03-01 and
    /// `2024年3月0日` is 2024-02-29.
    pub fn to_date(self) -> Option<NaiveDate> {
        let months = i64::from(self.year) * 12 + i64::from(self.month) - 1;
        let year = i32::try_from(months.div_euclid(12)).ok()?;
        let month = u32::try_from(months.rem_euclid(12)).ok()? + 1;
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        first.checked_add_signed(Duration::days(i64::from(self.day) - 1))
    }
}

/// Finds the first date declaration anywhere in `text`.
pub fn find_date_declaration(text: &str) -> Option<DateDeclaration> {
    let caps = DATE_DECLARATION_RE.captures(text)?;
    Some(DateDeclaration {
        year: caps[1].parse().ok()?,
        month: caps[2].parse().ok()?,
        day: caps[3].parse().ok()?,
    })
}

/// Picks the single date all events of one call are projected onto.
pub fn resolve_reference_date<C: Clock + ?Sized>(
    text: &str,
    supplied: Option<NaiveDate>,
    clock: &C,
) -> NaiveDate {
    let fallback = || supplied.unwrap_or_else(|| clock.today());

    let Some(declaration) = find_date_declaration(text) else {
        return fallback();
    };

    if let Some(date) = declaration.to_date() {
        tracing::trace!(?declaration, %date, "reference date taken from text");
        date
    } else {
        tracing::warn!(?declaration, "ignoring unrepresentable date declaration");
        fallback()
    }
}

/// Parses a `YYYY-MM-DD` string supplied by a caller.
pub fn parse_reference_date(s: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate {
        value: s.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn finds_declaration_inside_heading() {
        let decl = find_date_declaration("# 2024年3月20日 学习计划").unwrap();
        assert_eq!(
            decl,
            DateDeclaration {
                year: 2024,
                month: 3,
                day: 20
            }
        );
    }

    #[test]
    fn first_declaration_wins() {
        let decl = find_date_declaration("2024年1月2日 then 2025年6月7日").unwrap();
        assert_eq!(decl.to_date(), Some(date(2024, 1, 2)));
    }

    #[test]
    fn other_date_formats_are_not_declarations() {
        assert!(find_date_declaration("2024-03-20").is_none());
        assert!(find_date_declaration("3月20日").is_none());
    }

    #[test]
    fn month_thirteen_rolls_into_next_year() {
        let decl = find_date_declaration("2024年13月5日").unwrap();
        assert_eq!(decl.to_date(), Some(date(2025, 1, 5)));
    }

    #[test]
    fn february_thirtieth_rolls_into_march() {
        let leap = find_date_declaration("2024年2月30日").unwrap();
        assert_eq!(leap.to_date(), Some(date(2024, 3, 1)));

        let common = find_date_declaration("2023年2月30日").unwrap();
        assert_eq!(common.to_date(), Some(date(2023, 3, 2)));
    }

    #[test]
    fn zero_components_roll_backwards() {
        let month_zero = find_date_declaration("2024年0月1日").unwrap();
        assert_eq!(month_zero.to_date(), Some(date(2023, 12, 1)));

        let day_zero = find_date_declaration("2024年3月0日").unwrap();
        assert_eq!(day_zero.to_date(), Some(date(2024, 2, 29)));
    }

    #[test]
    fn declaration_beats_supplied_date() {
        let clock = FixedClock(date(2030, 1, 1));
        let resolved = resolve_reference_date("2024年3月20日", Some(date(2025, 6, 15)), &clock);
        assert_eq!(resolved, date(2024, 3, 20));
    }

    #[test]
    fn supplied_date_beats_clock() {
        let clock = FixedClock(date(2030, 1, 1));
        let resolved = resolve_reference_date("no date here", Some(date(2025, 6, 15)), &clock);
        assert_eq!(resolved, date(2025, 6, 15));
    }

    #[test]
    fn clock_is_last_resort() {
        let clock = FixedClock(date(2030, 1, 1));
        assert_eq!(resolve_reference_date("", None, &clock), date(2030, 1, 1));
    }

    #[test]
    fn parses_iso_reference_date() {
        assert_eq!(parse_reference_date("2024-01-15"), Ok(date(2024, 1, 15)));
        assert_eq!(parse_reference_date(" 2024-01-15\n"), Ok(date(2024, 1, 15)));
    }

    #[test]
    fn rejects_malformed_reference_date() {
        let err = parse_reference_date("15/01/2024").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid date: 15/01/2024 (expected YYYY-MM-DD)"
        );
    }
}
