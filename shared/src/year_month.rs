use chrono::{Datelike, NaiveDate};
use std::fmt;

/// A calendar month. Displays as `YYYY-MM`, the form the brushes query takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    /// 1-12
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, YearMonthError> {
        if (1..=12).contains(&month) {
            Ok(Self { year, month })
        } else {
            Err(YearMonthError::MonthOutOfRange(month))
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn of(date: NaiveDate) -> Self {
        Self { year: date.year(), month: date.month() }
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        // month is validated on construction, day 1 always exists
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    pub fn days_in_month(&self) -> u32 {
        let next = self.next().first_day();
        next.signed_duration_since(self.first_day()).num_days() as u32
    }

    /// Weekday of the 1st, 0 = Sunday
    pub fn first_day_of_week(&self) -> u32 {
        self.first_day().weekday().num_days_from_sunday()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn day(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum YearMonthError {
    MonthOutOfRange(u32),
}

impl fmt::Display for YearMonthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearMonthError::MonthOutOfRange(m) => write!(f, "Month must be 1-12, got {}", m),
        }
    }
}

impl std::error::Error for YearMonthError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_range_check() {
        let ym = YearMonth::new(2025, 6).unwrap();
        assert_eq!(ym.to_string(), "2025-06");
        assert_eq!((ym.year(), ym.month()), (2025, 6));
        assert_eq!(YearMonth::new(2025, 13), Err(YearMonthError::MonthOutOfRange(13)));
        assert_eq!(YearMonth::new(2025, 0), Err(YearMonthError::MonthOutOfRange(0)));
    }

    #[test]
    fn test_navigation_wraps_year() {
        let jan = YearMonth::new(2025, 1).unwrap();
        assert_eq!(jan.previous(), YearMonth::new(2024, 12).unwrap());
        let dec = YearMonth::new(2024, 12).unwrap();
        assert_eq!(dec.next(), jan);
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(YearMonth::new(2024, 2).unwrap().days_in_month(), 29);
        assert_eq!(YearMonth::new(2025, 2).unwrap().days_in_month(), 28);
        assert_eq!(YearMonth::new(2025, 6).unwrap().days_in_month(), 30);
        assert_eq!(YearMonth::new(2025, 12).unwrap().days_in_month(), 31);
    }

    #[test]
    fn test_first_day_of_week() {
        // 2025-06-01 was a Sunday, 2025-07-01 a Tuesday
        assert_eq!(YearMonth::new(2025, 6).unwrap().first_day_of_week(), 0);
        assert_eq!(YearMonth::new(2025, 7).unwrap().first_day_of_week(), 2);
    }

    #[test]
    fn test_contains() {
        let ym = YearMonth::new(2025, 6).unwrap();
        assert!(ym.contains(NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()));
        assert!(!ym.contains(NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()));
    }
}
