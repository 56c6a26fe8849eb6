//! Swiss federal public holidays.

use crate::easter::easter_sunday;
use crate::month::{CalendarError, CalendarResult, check_year};
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwissHoliday {
    NewYear,
    Berchtoldstag,
    GoodFriday,
    EasterMonday,
    Ascension,
    WhitMonday,
    NationalDay,
    Christmas,
    StStephen,
}

impl SwissHoliday {
    pub const ALL: [SwissHoliday; 9] = [
        SwissHoliday::NewYear,
        SwissHoliday::Berchtoldstag,
        SwissHoliday::GoodFriday,
        SwissHoliday::EasterMonday,
        SwissHoliday::Ascension,
        SwissHoliday::WhitMonday,
        SwissHoliday::NationalDay,
        SwissHoliday::Christmas,
        SwissHoliday::StStephen,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SwissHoliday::NewYear => "New Year's Day",
            SwissHoliday::Berchtoldstag => "Berchtold's Day",
            SwissHoliday::GoodFriday => "Good Friday",
            SwissHoliday::EasterMonday => "Easter Monday",
            SwissHoliday::Ascension => "Ascension Day",
            SwissHoliday::WhitMonday => "Whit Monday",
            SwissHoliday::NationalDay => "Swiss National Day",
            SwissHoliday::Christmas => "Christmas Day",
            SwissHoliday::StStephen => "St. Stephen's Day",
        }
    }

    /// Date of this holiday in `year`, given that year's Easter Sunday.
    fn date_in(&self, year: i32, easter: NaiveDate) -> Option<NaiveDate> {
        let fixed = |month, day| NaiveDate::from_ymd_opt(year, month, day);
        match self {
            SwissHoliday::NewYear => fixed(1, 1),
            SwissHoliday::Berchtoldstag => fixed(1, 2),
            SwissHoliday::NationalDay => fixed(8, 1),
            SwissHoliday::Christmas => fixed(12, 25),
            SwissHoliday::StStephen => fixed(12, 26),
            SwissHoliday::GoodFriday => easter.checked_sub_signed(Duration::days(2)),
            SwissHoliday::EasterMonday => easter.checked_add_signed(Duration::days(1)),
            SwissHoliday::Ascension => easter.checked_add_signed(Duration::days(39)),
            SwissHoliday::WhitMonday => easter.checked_add_signed(Duration::days(50)),
        }
    }
}

impl fmt::Display for SwissHoliday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// All holidays observed in one year. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HolidaySet {
    year: i32,
    easter: NaiveDate,
    dates: BTreeMap<NaiveDate, SwissHoliday>,
}

impl HolidaySet {
    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn easter_sunday(&self) -> NaiveDate {
        self.easter
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains_key(&date)
    }

    pub fn holiday_on(&self, date: NaiveDate) -> Option<SwissHoliday> {
        self.dates.get(&date).copied()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Holidays in date order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, SwissHoliday)> + '_ {
        self.dates.iter().map(|(date, kind)| (*date, *kind))
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.dates.keys().copied()
    }

    pub fn in_month(&self, month: u32) -> impl Iterator<Item = (NaiveDate, SwissHoliday)> + '_ {
        self.iter().filter(move |(date, _)| date.month() == month)
    }
}

/// Fixed dates plus the Easter-relative feasts for `year`.
pub fn swiss_holidays(year: i32) -> CalendarResult<HolidaySet> {
    let easter = easter_sunday(year)?;
    let mut dates = BTreeMap::new();
    for kind in SwissHoliday::ALL {
        let date = kind
            .date_in(check_year(year)?, easter)
            .ok_or(CalendarError::YearOutOfRange(year))?;
        dates.insert(date, kind);
    }
    Ok(HolidaySet {
        year,
        easter,
        dates,
    })
}
