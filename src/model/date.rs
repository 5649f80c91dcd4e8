//! Date conversions between the API wire format (`yyyy-mm-dd`) and the
//! display format the product uses (`dd/mm/yyyy`), plus the [`MonthRef`]
//! value that names one calendar month.

use crate::Result;
use anyhow::{bail, Context};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

const API_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_FORMAT: &str = "%d/%m/%Y";

/// Formats a date for the wire, e.g. `2024-03-05`.
pub fn api_date(date: NaiveDate) -> String {
    date.format(API_FORMAT).to_string()
}

/// Parses a wire date. Exact inverse of [`api_date`].
pub fn parse_api_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), API_FORMAT)
        .with_context(|| format!("Invalid date '{s}', expected yyyy-mm-dd"))
}

/// Formats a date for display, e.g. `05/03/2024`.
pub fn display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// Parses a display date. Exact inverse of [`display_date`].
pub fn parse_display_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DISPLAY_FORMAT)
        .with_context(|| format!("Invalid date '{s}', expected dd/mm/yyyy"))
}

/// Parses user-supplied date input, accepting either the wire or the display
/// format.
pub fn parse_date_input(s: &str) -> Result<NaiveDate> {
    let trimmed = s.trim();
    NaiveDate::parse_from_str(trimmed, API_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(trimmed, DISPLAY_FORMAT))
        .with_context(|| format!("Invalid date '{s}', expected yyyy-mm-dd or dd/mm/yyyy"))
}

/// The uppercase Portuguese weekday name used in day-section headers.
pub fn weekday_label(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "SEGUNDA-FEIRA",
        Weekday::Tue => "TERÇA-FEIRA",
        Weekday::Wed => "QUARTA-FEIRA",
        Weekday::Thu => "QUINTA-FEIRA",
        Weekday::Fri => "SEXTA-FEIRA",
        Weekday::Sat => "SÁBADO",
        Weekday::Sun => "DOMINGO",
    }
}

/// A (month, year) pair naming one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthRef {
    pub month: u32,
    pub year: i32,
}

impl MonthRef {
    pub fn new(month: u32, year: i32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            bail!("month must be between 1 and 12, got {month}");
        }
        Ok(Self { month, year })
    }

    /// The month containing `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            year: date.year(),
        }
    }

    /// True when `date` falls inside this calendar month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.month() == self.month && date.year() == self.year
    }

    /// The zero-padded `MM/YY` label.
    pub fn label(&self) -> String {
        format!("{:02}/{:02}", self.month, self.year.rem_euclid(100))
    }
}

impl fmt::Display for MonthRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}

impl FromStr for MonthRef {
    type Err = crate::Error;

    /// Accepts `MM/YYYY` (display style) or `YYYY-MM` (wire style).
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let (month_part, year_part) = if let Some((m, y)) = trimmed.split_once('/') {
            (m, y)
        } else if let Some((y, m)) = trimmed.split_once('-') {
            (m, y)
        } else {
            bail!("invalid month '{s}', expected MM/YYYY or YYYY-MM");
        };
        let parse = || -> Option<(u32, i32)> {
            Some((month_part.parse().ok()?, year_part.parse().ok()?))
        };
        let (month, year) = match parse() {
            Some(pair) => pair,
            None => bail!("invalid month '{s}', expected MM/YYYY or YYYY-MM"),
        };
        MonthRef::new(month, year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_api_date_format() {
        assert_eq!(api_date(date(2024, 3, 5)), "2024-03-05");
    }

    #[test]
    fn test_api_date_round_trip() {
        for d in [
            date(2024, 3, 5),
            date(2024, 12, 31),
            date(2025, 1, 1),
            date(2024, 2, 29),
        ] {
            assert_eq!(parse_api_date(&api_date(d)).unwrap(), d);
        }
    }

    #[test]
    fn test_parse_api_date_rejects_garbage() {
        assert!(parse_api_date("05/03/2024").is_err());
        assert!(parse_api_date("not-a-date").is_err());
        assert!(parse_api_date("2024-13-01").is_err());
    }

    #[test]
    fn test_display_date_format() {
        assert_eq!(display_date(date(2024, 3, 5)), "05/03/2024");
    }

    #[test]
    fn test_display_date_round_trip() {
        let d = date(2024, 12, 31);
        assert_eq!(parse_display_date(&display_date(d)).unwrap(), d);
    }

    #[test]
    fn test_parse_date_input_accepts_both_formats() {
        assert_eq!(parse_date_input("2024-03-05").unwrap(), date(2024, 3, 5));
        assert_eq!(parse_date_input("05/03/2024").unwrap(), date(2024, 3, 5));
        assert_eq!(parse_date_input(" 2024-03-05 ").unwrap(), date(2024, 3, 5));
    }

    #[test]
    fn test_parse_date_input_rejects_garbage() {
        assert!(parse_date_input("03-05-2024").is_err());
        assert!(parse_date_input("").is_err());
    }

    #[test]
    fn test_weekday_label() {
        // 2024-03-06 was a Wednesday.
        assert_eq!(weekday_label(date(2024, 3, 6)), "QUARTA-FEIRA");
        assert_eq!(weekday_label(date(2024, 3, 9)), "SÁBADO");
        assert_eq!(weekday_label(date(2024, 3, 10)), "DOMINGO");
    }

    #[test]
    fn test_month_ref_parse_display_style() {
        let selected = MonthRef::from_str("03/2024").unwrap();
        assert_eq!(selected, MonthRef::new(3, 2024).unwrap());
    }

    #[test]
    fn test_month_ref_parse_wire_style() {
        let selected = MonthRef::from_str("2024-03").unwrap();
        assert_eq!(selected, MonthRef::new(3, 2024).unwrap());
    }

    #[test]
    fn test_month_ref_parse_rejects_bad_input() {
        assert!(MonthRef::from_str("13/2024").is_err());
        assert!(MonthRef::from_str("2024-13").is_err());
        assert!(MonthRef::from_str("march").is_err());
        assert!(MonthRef::from_str("").is_err());
    }

    #[test]
    fn test_month_ref_contains() {
        let selected = MonthRef::new(3, 2024).unwrap();
        assert!(selected.contains(date(2024, 3, 1)));
        assert!(selected.contains(date(2024, 3, 31)));
        assert!(!selected.contains(date(2024, 4, 1)));
        assert!(!selected.contains(date(2023, 3, 15)));
    }

    #[test]
    fn test_month_ref_label() {
        assert_eq!(MonthRef::new(7, 2025).unwrap().label(), "07/25");
        assert_eq!(MonthRef::new(12, 2009).unwrap().label(), "12/09");
    }
}
