use chrono::{Datelike, Month, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Earliest year the Gregorian Easter computation is defined for.
pub const MIN_YEAR: i32 = 1583;
pub const MAX_YEAR: i32 = 9999;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("month {0} is outside 1..=12")]
    InvalidMonth(u32),
    #[error("year {0} is outside the supported range {MIN_YEAR}..={MAX_YEAR}")]
    YearOutOfRange(i32),
    #[error("invalid month '{0}' (expected YYYY-MM)")]
    Parse(String),
}

pub type CalendarResult<T> = Result<T, CalendarError>;

pub(crate) fn check_year(year: i32) -> CalendarResult<i32> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(year)
    } else {
        Err(CalendarError::YearOutOfRange(year))
    }
}

/// A calendar month of a specific year.
///
/// Month numbers are 1-based everywhere in this crate; callers holding a
/// 0-based index go through [`YearMonth::from_zero_based`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearMonth {
    year: i32,
    month: Month,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> CalendarResult<Self> {
        let year = check_year(year)?;
        let month = u8::try_from(month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .ok_or(CalendarError::InvalidMonth(month))?;
        Ok(Self { year, month })
    }

    pub fn from_zero_based(year: i32, index: u32) -> CalendarResult<Self> {
        if index > 11 {
            return Err(CalendarError::InvalidMonth(index.saturating_add(1)));
        }
        Self::new(year, index + 1)
    }

    pub fn of(date: NaiveDate) -> CalendarResult<Self> {
        Self::new(date.year(), date.month())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Month {
        self.month
    }

    /// 1-based month number.
    pub fn number(&self) -> u32 {
        self.month.number_from_month()
    }

    pub fn first_day(&self) -> NaiveDate {
        // year and month are validated on construction
        NaiveDate::from_ymd_opt(self.year, self.number(), 1).unwrap_or(NaiveDate::MIN)
    }

    /// Day before the first of the following month.
    pub fn last_day(&self) -> NaiveDate {
        let (year, month) = if self.number() == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.number() + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|d| d.pred_opt())
            .unwrap_or_else(|| {
                // December 9999: the next month is past chrono's range of
                // our supported years, but the 31st always exists.
                NaiveDate::from_ymd_opt(self.year, 12, 31).unwrap_or(NaiveDate::MAX)
            })
    }

    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.number()
    }

    /// The month `n` months later, rolling across year boundaries.
    pub fn plus_months(&self, n: u32) -> CalendarResult<Self> {
        let zero_based = i64::from(self.number() - 1) + i64::from(n);
        let year = i64::from(self.year) + zero_based / 12;
        let year = i32::try_from(year).map_err(|_| CalendarError::YearOutOfRange(i32::MAX))?;
        Self::new(year, (zero_based % 12) as u32 + 1)
    }

    pub fn iter_days(self) -> impl Iterator<Item = NaiveDate> {
        let last = self.last_day();
        self.first_day().iter_days().take_while(move |d| *d <= last)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.number())
    }
}

impl FromStr for YearMonth {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (year, month) = trimmed
            .split_once('-')
            .ok_or_else(|| CalendarError::Parse(trimmed.to_string()))?;
        let year: i32 = year
            .parse()
            .map_err(|_| CalendarError::Parse(trimmed.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| CalendarError::Parse(trimmed.to_string()))?;
        Self::new(year, month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plus_months_rolls_into_next_year() {
        let nov = YearMonth::new(2025, 11).unwrap();
        assert_eq!(nov.plus_months(2).unwrap(), YearMonth::new(2026, 1).unwrap());
        assert_eq!(nov.plus_months(14).unwrap(), YearMonth::new(2027, 1).unwrap());
    }

    #[test]
    fn last_day_handles_leap_february() {
        assert_eq!(YearMonth::new(2024, 2).unwrap().days_in_month(), 29);
        assert_eq!(YearMonth::new(2023, 2).unwrap().days_in_month(), 28);
        assert_eq!(YearMonth::new(1900, 2).unwrap().days_in_month(), 28);
        assert_eq!(YearMonth::new(2000, 2).unwrap().days_in_month(), 29);
        assert_eq!(YearMonth::new(9999, 12).unwrap().days_in_month(), 31);
    }

    #[test]
    fn rejects_out_of_range_months() {
        assert_eq!(YearMonth::new(2025, 0), Err(CalendarError::InvalidMonth(0)));
        assert_eq!(YearMonth::new(2025, 13), Err(CalendarError::InvalidMonth(13)));
        assert!(YearMonth::from_zero_based(2025, 12).is_err());
        assert_eq!(
            YearMonth::from_zero_based(2025, u32::MAX),
            Err(CalendarError::InvalidMonth(u32::MAX))
        );
        assert_eq!(
            YearMonth::from_zero_based(2025, 11).unwrap(),
            YearMonth::new(2025, 12).unwrap()
        );
    }

    #[test]
    fn parses_form_month_input() {
        let ym: YearMonth = "2025-03".parse().unwrap();
        assert_eq!(ym.year(), 2025);
        assert_eq!(ym.number(), 3);
        assert_eq!(ym.to_string(), "2025-03");
        assert!("2025/03".parse::<YearMonth>().is_err());
    }
}
