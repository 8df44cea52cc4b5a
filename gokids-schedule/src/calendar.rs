use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Default number of days shown by the date picker.
pub const DEFAULT_WINDOW_DAYS: u32 = 14;

/// The rolling window of selectable dates. Paging moves the whole window
/// forward or backward by its own length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarWindow {
    start: NaiveDate,
    days: u32,
}

impl CalendarWindow {
    pub fn new(start: NaiveDate, days: u32) -> Self {
        Self {
            start,
            days: days.max(1),
        }
    }

    pub fn starting_today(today: NaiveDate) -> Self {
        Self::new(today, DEFAULT_WINDOW_DAYS)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn len(&self) -> u32 {
        self.days
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// All dates currently visible, in order.
    pub fn dates(&self) -> Vec<NaiveDate> {
        (0..self.days)
            .map(|i| self.start + Duration::days(i as i64))
            .collect()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.start + Duration::days(self.days as i64)
    }

    pub fn next(&self) -> Self {
        Self::new(self.start + Duration::days(self.days as i64), self.days)
    }

    pub fn prev(&self) -> Self {
        Self::new(self.start - Duration::days(self.days as i64), self.days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn window_yields_consecutive_dates() {
        let window = CalendarWindow::starting_today(day(2024, 3, 4));
        let dates = window.dates();
        assert_eq!(dates.len(), 14);
        assert_eq!(dates[0], day(2024, 3, 4));
        assert_eq!(dates[13], day(2024, 3, 17));
    }

    #[test]
    fn paging_moves_by_whole_window() {
        let window = CalendarWindow::new(day(2024, 3, 4), 14);
        assert_eq!(window.next().start(), day(2024, 3, 18));
        assert_eq!(window.prev().start(), day(2024, 2, 19));
        assert_eq!(window.next().prev(), window);
    }

    #[test]
    fn contains_covers_the_visible_range_only() {
        let window = CalendarWindow::new(day(2024, 3, 4), 14);
        assert!(window.contains(day(2024, 3, 4)));
        assert!(window.contains(day(2024, 3, 17)));
        assert!(!window.contains(day(2024, 3, 18)));
        assert!(!window.contains(day(2024, 3, 3)));
    }
}
