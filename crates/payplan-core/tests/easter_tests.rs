use chrono::{Datelike, NaiveDate, Weekday};
use payplan::{CalendarError, easter_sunday};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn reference_years() {
    assert_eq!(easter_sunday(2023).unwrap(), d(2023, 4, 9));
    assert_eq!(easter_sunday(2024).unwrap(), d(2024, 3, 31));
    assert_eq!(easter_sunday(2025).unwrap(), d(2025, 4, 20));
    assert_eq!(easter_sunday(2026).unwrap(), d(2026, 4, 5));
}

#[test]
fn earliest_and_latest_possible_dates() {
    // March 22 and April 25 are the Gregorian bounds
    assert_eq!(easter_sunday(1818).unwrap(), d(1818, 3, 22));
    assert_eq!(easter_sunday(2285).unwrap(), d(2285, 3, 22));
    assert_eq!(easter_sunday(1943).unwrap(), d(1943, 4, 25));
    assert_eq!(easter_sunday(2038).unwrap(), d(2038, 4, 25));
}

#[test]
fn always_a_sunday_within_bounds() {
    for year in 1583..=3000 {
        let easter = easter_sunday(year).unwrap();
        assert_eq!(easter.weekday(), Weekday::Sun, "year {year}");
        assert!(easter >= d(year, 3, 22) && easter <= d(year, 4, 25), "year {year}");
    }
}

#[test]
fn rejects_pre_gregorian_years() {
    assert_eq!(easter_sunday(1582), Err(CalendarError::YearOutOfRange(1582)));
    assert_eq!(easter_sunday(-5), Err(CalendarError::YearOutOfRange(-5)));
}
