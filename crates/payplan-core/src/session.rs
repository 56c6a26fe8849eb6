use crate::calendar::SwissCalendar;
use crate::format::{DateFormatter, EnglishFormatter};
use crate::schedule::{Activity, Schedule, ScheduleError, ScheduleRequest};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("no schedule has been calculated yet")]
    NoSchedule,
    #[error("month {index} is out of range (schedule has {len} months)")]
    MonthOutOfRange { index: usize, len: usize },
    #[error("week {week} is out of range for month {index} ({weeks} weeks)")]
    WeekOutOfRange { index: usize, week: u32, weeks: usize },
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Holds the current calculation result and the user's edits to it.
///
/// Each submission replaces the schedule wholesale. The calendar outlives
/// schedules: it keeps one holiday set per year any submission has touched,
/// so it holds at most one entry per supported year and `clear` leaves it
/// alone.
pub struct Session {
    calendar: SwissCalendar,
    formatter: Box<dyn DateFormatter>,
    schedule: Option<Schedule>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_formatter(Box::new(EnglishFormatter::default()))
    }

    pub fn with_formatter(formatter: Box<dyn DateFormatter>) -> Self {
        Self {
            calendar: SwissCalendar::new(),
            formatter,
            schedule: None,
        }
    }

    pub fn calendar(&self) -> &SwissCalendar {
        &self.calendar
    }

    pub fn formatter(&self) -> &dyn DateFormatter {
        self.formatter.as_ref()
    }

    pub fn schedule(&self) -> Option<&Schedule> {
        self.schedule.as_ref()
    }

    pub fn require_schedule(&self) -> SessionResult<&Schedule> {
        self.schedule.as_ref().ok_or(SessionError::NoSchedule)
    }

    pub fn submit(&mut self, request: &ScheduleRequest) -> SessionResult<&Schedule> {
        request.validate()?;
        let end = request.end()?;
        for year in request.start.year()..=end.year() {
            self.calendar
                .prepare_year(year)
                .map_err(ScheduleError::from)?;
        }

        let schedule = Schedule::compute(request, &self.calendar, self.formatter.as_ref())?;
        info!(
            start = %request.start,
            months = request.duration_months,
            working_days = schedule.totals().working_days,
            "schedule calculated"
        );
        Ok(self.schedule.insert(schedule))
    }

    pub fn clear(&mut self) {
        self.schedule = None;
    }

    pub fn set_deliverables(&mut self, index: usize, text: impl Into<String>) -> SessionResult<()> {
        let schedule = self.schedule.as_mut().ok_or(SessionError::NoSchedule)?;
        let len = schedule.len();
        let month = schedule
            .month_mut(index)
            .ok_or(SessionError::MonthOutOfRange { index, len })?;
        month.deliverables = text.into();
        Ok(())
    }

    pub fn set_work_plan_entry(
        &mut self,
        index: usize,
        week: u32,
        activity: Activity,
        text: impl Into<String>,
    ) -> SessionResult<()> {
        let schedule = self.schedule.as_mut().ok_or(SessionError::NoSchedule)?;
        let len = schedule.len();
        let month = schedule
            .month_mut(index)
            .ok_or(SessionError::MonthOutOfRange { index, len })?;
        let weeks = month.work_plan.len();
        let entry = month
            .work_plan
            .week_mut(week)
            .ok_or(SessionError::WeekOutOfRange { index, week, weeks })?;
        entry.set_entry(activity, text);
        Ok(())
    }
}
