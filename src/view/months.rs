//! The month window that drives month selection.

use crate::model::MonthRef;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// One selectable month in the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthItem {
    /// Calendar month, 1 through 12.
    pub month: u32,
    pub year: i32,
    /// Zero-padded `MM/YY`.
    pub label: String,
}

/// Generates the ordered month window: `past` months back through `future`
/// months forward of `today`, always `past + future + 1` items, oldest first.
///
/// Depends only on its arguments; callers inject `today` so the window is
/// reproducible.
pub fn month_window(today: NaiveDate, past: u32, future: u32) -> Vec<MonthItem> {
    // Months counted on a single axis (year * 12 + month0) so the walk
    // crosses year boundaries without special cases.
    let current = today.year() * 12 + today.month0() as i32;
    (current - past as i32..=current + future as i32)
        .map(|total| {
            let year = total.div_euclid(12);
            let month = total.rem_euclid(12) as u32 + 1;
            MonthItem {
                month,
                year,
                label: MonthRef { month, year }.label(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_window_size_and_order() {
        for (past, future) in [(12u32, 12u32), (0, 0), (5, 0), (0, 7), (30, 2)] {
            let window = month_window(date(2024, 6, 15), past, future);
            assert_eq!(window.len(), (past + future + 1) as usize);
            for pair in window.windows(2) {
                let a = pair[0].year * 12 + pair[0].month as i32;
                let b = pair[1].year * 12 + pair[1].month as i32;
                assert!(a < b, "window must be strictly ascending");
            }
        }
    }

    #[test]
    fn test_window_no_duplicates() {
        let window = month_window(date(2024, 6, 15), 12, 12);
        let mut pairs: Vec<(u32, i32)> = window.iter().map(|m| (m.month, m.year)).collect();
        pairs.dedup();
        assert_eq!(pairs.len(), 25);
    }

    #[test]
    fn test_window_centered_on_today() {
        let window = month_window(date(2024, 1, 15), 2, 1);
        let pairs: Vec<(u32, i32)> = window.iter().map(|m| (m.month, m.year)).collect();
        assert_eq!(pairs, vec![(11, 2023), (12, 2023), (1, 2024), (2, 2024)]);
    }

    #[test]
    fn test_window_rolls_backward_over_january() {
        let window = month_window(date(2024, 1, 10), 1, 0);
        assert_eq!(window[0].month, 12);
        assert_eq!(window[0].year, 2023);
        assert_eq!(window[0].label, "12/23");
    }

    #[test]
    fn test_window_rolls_forward_over_december() {
        let window = month_window(date(2024, 12, 10), 0, 1);
        assert_eq!(window[1].month, 1);
        assert_eq!(window[1].year, 2025);
        assert_eq!(window[1].label, "01/25");
    }

    #[test]
    fn test_labels_are_zero_padded() {
        let window = month_window(date(2024, 3, 1), 0, 0);
        assert_eq!(window[0].label, "03/24");
    }

    #[test]
    fn test_day_of_month_does_not_matter() {
        let first = month_window(date(2024, 5, 1), 3, 3);
        let last = month_window(date(2024, 5, 31), 3, 3);
        assert_eq!(first, last);
    }
}
