pub mod calendar;
pub mod config;
pub mod easter;
pub mod export;
pub mod format;
pub mod holidays;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod month;
pub mod schedule;
pub mod session;

pub use calendar::{
    SwissCalendar, is_holiday, is_weekend, last_working_day_of_month, working_days_in_month,
};
pub use config::{Config, ConfigError};
pub use easter::easter_sunday;
pub use export::{ExportError, ExportResult, schedule_to_csv, schedule_to_json};
pub use format::{DateFormatter, EnglishFormatter, format_date_dmy, format_month_label};
pub use holidays::{HolidaySet, SwissHoliday, swiss_holidays};
pub use month::{CalendarError, CalendarResult, YearMonth};
pub use schedule::{
    Activity, MonthlyResult, Schedule, ScheduleError, ScheduleRequest, ScheduleTotals, WorkPlan,
    WorkWeek,
};
pub use session::{Session, SessionError};
