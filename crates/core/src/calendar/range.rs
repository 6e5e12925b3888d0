use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::DateRangeError;

/// Number of cells in a 6x7 month grid.
pub const GRID_DAYS: i64 = 42;

/// A date range with inclusive start and end dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a new date range, validating that start <= end.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::InvalidRange);
        }
        Ok(Self { start, end })
    }

    /// Creates a date range for an entire month. Returns `None` for an invalid month.
    pub fn month(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self::containing_month)
    }

    /// The whole month that `date` falls in.
    pub fn containing_month(date: NaiveDate) -> Self {
        Self {
            start: first_of_month(date),
            end: last_of_month(date),
        }
    }

    /// The whole weeks (Sunday to Saturday) covering `date`'s month: 28 to 42 days.
    pub fn month_weeks(date: NaiveDate) -> Self {
        let month = Self::containing_month(date);
        let start = start_of_week(month.start);
        let end = start_of_week(month.end) + Duration::days(6);
        Self { start, end }
    }

    /// The 42 days of the 6x7 grid showing `date`'s month, starting on a Sunday.
    pub fn month_grid(date: NaiveDate) -> Self {
        let start = start_of_week(first_of_month(date));
        let end = start + Duration::days(GRID_DAYS - 1);
        Self { start, end }
    }

    /// Returns true if `date` lies within the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days in the range, counting both ends.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Iterates every day of the range in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }
}

/// The first day of `date`'s month.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

/// The Sunday on or before `date`.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// Same day next month, clamped to the month's last day.
pub fn next_month(date: NaiveDate) -> NaiveDate {
    date.checked_add_months(Months::new(1)).unwrap_or(date)
}

/// Same day last month, clamped to the month's last day.
pub fn prev_month(date: NaiveDate) -> NaiveDate {
    date.checked_sub_months(Months::new(1)).unwrap_or(date)
}

/// The last day of `date`'s month.
pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    first_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_valid_range_construction() {
        let range = DateRange::new(make_date(2024, 1, 1), make_date(2024, 1, 31)).unwrap();

        assert_eq!(range.start, make_date(2024, 1, 1));
        assert_eq!(range.end, make_date(2024, 1, 31));
        assert_eq!(range.num_days(), 31);
    }

    #[test]
    fn test_invalid_range_returns_error() {
        let result = DateRange::new(make_date(2024, 1, 31), make_date(2024, 1, 1));
        assert_eq!(result, Err(DateRangeError::InvalidRange));
    }

    #[test]
    fn test_month_factory_february_leap_year() {
        let range = DateRange::month(2024, 2).unwrap();

        assert_eq!(range.start, make_date(2024, 2, 1));
        assert_eq!(range.end, make_date(2024, 2, 29));
    }

    #[test]
    fn test_month_factory_february_non_leap_year() {
        let range = DateRange::month(2023, 2).unwrap();
        assert_eq!(range.end, make_date(2023, 2, 28));

        let range = DateRange::month(1900, 2).unwrap();
        assert_eq!(range.end, make_date(1900, 2, 28));
    }

    #[test]
    fn test_last_of_month() {
        assert_eq!(last_of_month(make_date(2024, 2, 10)), make_date(2024, 2, 29));
        assert_eq!(last_of_month(make_date(2000, 2, 1)), make_date(2000, 2, 29));
        assert_eq!(last_of_month(make_date(2024, 4, 30)), make_date(2024, 4, 30));
        assert_eq!(last_of_month(make_date(2024, 12, 1)), make_date(2024, 12, 31));
        assert_eq!(last_of_month(NaiveDate::MAX), NaiveDate::MAX);
    }

    #[test]
    fn test_month_factory_december() {
        let range = DateRange::month(2024, 12).unwrap();

        assert_eq!(range.start, make_date(2024, 12, 1));
        assert_eq!(range.end, make_date(2024, 12, 31));
    }

    #[test]
    fn test_month_factory_invalid_month() {
        assert!(DateRange::month(2024, 13).is_none());
    }

    #[test]
    fn test_month_weeks_spans_whole_weeks() {
        // February 2015 starts on a Sunday and has exactly four weeks.
        let range = DateRange::month_weeks(make_date(2015, 2, 10));
        assert_eq!(range.num_days(), 28);
        assert_eq!(range.start.weekday(), Weekday::Sun);
        assert_eq!(range.end.weekday(), Weekday::Sat);

        // March 2024 starts on a Friday.
        let range = DateRange::month_weeks(make_date(2024, 3, 15));
        assert_eq!(range.start, make_date(2024, 2, 25));
        assert_eq!(range.end, make_date(2024, 4, 6));
        assert_eq!(range.num_days(), 42);
    }

    #[test]
    fn test_month_grid_is_42_days_from_sunday() {
        let range = DateRange::month_grid(make_date(2015, 2, 10));

        assert_eq!(range.start, make_date(2015, 2, 1));
        assert_eq!(range.num_days(), GRID_DAYS);
        assert_eq!(range.start.weekday(), Weekday::Sun);
    }

    #[test]
    fn test_days_iterates_inclusive() {
        let range = DateRange::new(make_date(2024, 2, 27), make_date(2024, 3, 2)).unwrap();
        let days: Vec<NaiveDate> = range.days().collect();

        assert_eq!(days.len(), 5);
        assert_eq!(days[2], make_date(2024, 2, 29));
        assert!(range.contains(make_date(2024, 3, 2)));
        assert!(!range.contains(make_date(2024, 3, 3)));
    }

    #[test]
    fn test_month_navigation_clamps() {
        assert_eq!(next_month(make_date(2024, 1, 31)), make_date(2024, 2, 29));
        assert_eq!(prev_month(make_date(2024, 3, 31)), make_date(2024, 2, 29));
        assert_eq!(next_month(make_date(2024, 12, 5)), make_date(2025, 1, 5));
    }

    #[test]
    fn test_start_of_week_is_sunday() {
        // 2024-03-06 is a Wednesday
        assert_eq!(start_of_week(make_date(2024, 3, 6)), make_date(2024, 3, 3));
        assert_eq!(start_of_week(make_date(2024, 3, 3)), make_date(2024, 3, 3));
    }
}
