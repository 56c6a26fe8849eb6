use crate::month::{CalendarError, CalendarResult, check_year};
use chrono::NaiveDate;

/// Easter Sunday of `year` by the anonymous Gregorian algorithm.
///
/// Integer arithmetic only. Years before 1583 (pre-Gregorian) and past
/// 9999 are rejected.
pub fn easter_sunday(year: i32) -> CalendarResult<NaiveDate> {
    let y = check_year(year)?;
    let a = y % 19;
    let b = y / 100;
    let c = y % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;

    NaiveDate::from_ymd_opt(y, month as u32, day as u32)
        .ok_or(CalendarError::YearOutOfRange(year))
}
