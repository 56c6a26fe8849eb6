use crate::holidays::{HolidaySet, swiss_holidays};
use crate::month::{CalendarResult, YearMonth};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::borrow::Cow;
use std::collections::HashMap;
use tracing::trace;

/// Longest month; bounds the backward milestone scan.
const MAX_DAYS_IN_MONTH: u32 = 31;

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

pub fn is_holiday(date: NaiveDate, holidays: &HolidaySet) -> bool {
    holidays.contains(date)
}

/// Working days of one month, deriving the holiday set for the year on every call.
pub fn working_days_in_month(period: YearMonth) -> CalendarResult<u32> {
    let holidays = swiss_holidays(period.year())?;
    Ok(count_working_days(period, &holidays))
}

/// Milestone date of one month, deriving the holiday set for the year on every call.
pub fn last_working_day_of_month(period: YearMonth) -> CalendarResult<NaiveDate> {
    let holidays = swiss_holidays(period.year())?;
    Ok(scan_last_working_day(period, &holidays))
}

fn is_working_day(date: NaiveDate, holidays: &HolidaySet) -> bool {
    !is_weekend(date) && !is_holiday(date, holidays)
}

fn count_working_days(period: YearMonth, holidays: &HolidaySet) -> u32 {
    period
        .iter_days()
        .filter(|d| is_working_day(*d, holidays))
        .count() as u32
}

/// Walks back from the month's last day. If no working day turns up within
/// the month the last calendar day is returned; no real Swiss month gets
/// there, the bound only guarantees termination.
fn scan_last_working_day(period: YearMonth, holidays: &HolidaySet) -> NaiveDate {
    scan_back_for(period, |d| is_working_day(d, holidays))
}

fn scan_back_for(period: YearMonth, is_working: impl Fn(NaiveDate) -> bool) -> NaiveDate {
    let last = period.last_day();
    let mut current = last;
    for _ in 0..MAX_DAYS_IN_MONTH {
        if !period.contains(current) {
            break;
        }
        if is_working(current) {
            return current;
        }
        match current.pred_opt() {
            Some(prev) => current = prev,
            None => break,
        }
    }
    trace!(%period, "no working day in month, falling back to last calendar day");
    last
}

/// Swiss working-day calendar with holiday sets cached per year.
///
/// Years outside the prepared span are computed on demand and not stored,
/// so lookups only need `&self`.
#[derive(Debug, Clone, Default)]
pub struct SwissCalendar {
    holidays: HashMap<i32, HolidaySet>,
}

impl SwissCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_year_range(start_year: i32, end_year: i32) -> CalendarResult<Self> {
        let (start, end) = if start_year <= end_year {
            (start_year, end_year)
        } else {
            (end_year, start_year)
        };

        let mut calendar = Self::new();
        for year in start..=end {
            calendar.prepare_year(year)?;
        }
        Ok(calendar)
    }

    /// Cache the holiday set for `year`.
    pub fn prepare_year(&mut self, year: i32) -> CalendarResult<&HolidaySet> {
        if !self.holidays.contains_key(&year) {
            let set = swiss_holidays(year)?;
            self.holidays.insert(year, set);
        }
        Ok(&self.holidays[&year])
    }

    pub fn cached_years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.holidays.keys().copied().collect();
        years.sort_unstable();
        years
    }

    pub fn holidays(&self, year: i32) -> CalendarResult<Cow<'_, HolidaySet>> {
        match self.holidays.get(&year) {
            Some(set) => Ok(Cow::Borrowed(set)),
            None => Ok(Cow::Owned(swiss_holidays(year)?)),
        }
    }

    pub fn is_available(&self, date: NaiveDate) -> CalendarResult<bool> {
        let holidays = self.holidays(date.year())?;
        Ok(is_working_day(date, &holidays))
    }

    pub fn working_days_in_month(&self, period: YearMonth) -> CalendarResult<u32> {
        let holidays = self.holidays(period.year())?;
        Ok(count_working_days(period, &holidays))
    }

    pub fn last_working_day_of_month(&self, period: YearMonth) -> CalendarResult<NaiveDate> {
        let holidays = self.holidays(period.year())?;
        Ok(scan_last_working_day(period, &holidays))
    }

    /// All working days in `start..=end`.
    pub fn working_days_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> CalendarResult<Vec<NaiveDate>> {
        let mut days = Vec::new();
        let mut current = start;
        let mut holidays = self.holidays(current.year())?;

        while current <= end {
            if current.year() != holidays.year() {
                holidays = self.holidays(current.year())?;
            }
            if is_working_day(current, &holidays) {
                days.push(current);
            }
            current = current + Duration::days(1);
        }
        Ok(days)
    }

    /// Count of working days in `start..=end`.
    pub fn working_days_between(&self, start: NaiveDate, end: NaiveDate) -> CalendarResult<u32> {
        Ok(self.working_days_in_range(start, end)?.len() as u32)
    }
}
