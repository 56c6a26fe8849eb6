use crate::calendar::SwissCalendar;
use crate::format::{DateFormatter, format_day_month};
use crate::month::{CalendarError, YearMonth};
use chrono::{Datelike, Duration, NaiveDate};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

pub const MAX_DURATION_MONTHS: u32 = 240;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    #[error("rate must be a finite, non-negative number (got {0})")]
    InvalidRate(f64),
    #[error("duration must be between 1 and {MAX_DURATION_MONTHS} months (got {0})")]
    InvalidDuration(u32),
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Inputs of one calculation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    /// Amount paid per working day.
    pub rate: f64,
    pub start: YearMonth,
    pub duration_months: u32,
}

impl ScheduleRequest {
    pub fn new(rate: f64, start: YearMonth, duration_months: u32) -> Self {
        Self {
            rate,
            start,
            duration_months,
        }
    }

    pub fn validate(&self) -> ScheduleResult<()> {
        if !self.rate.is_finite() || self.rate < 0.0 {
            return Err(ScheduleError::InvalidRate(self.rate));
        }
        if self.duration_months == 0 || self.duration_months > MAX_DURATION_MONTHS {
            return Err(ScheduleError::InvalidDuration(self.duration_months));
        }
        Ok(())
    }

    pub fn end(&self) -> ScheduleResult<YearMonth> {
        Ok(self.start.plus_months(self.duration_months.saturating_sub(1))?)
    }

    pub fn periods(&self) -> ScheduleResult<Vec<YearMonth>> {
        (0..self.duration_months)
            .map(|i| self.start.plus_months(i).map_err(ScheduleError::from))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    Supplier,
    Client,
}

impl Activity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Activity::Supplier => "supplier",
            Activity::Client => "client",
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Activity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "supplier" => Ok(Activity::Supplier),
            "client" => Ok(Activity::Client),
            other => Err(format!("unknown activity '{other}' (supplier|client)")),
        }
    }
}

/// A Monday-to-Sunday week clipped to its month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkWeek {
    /// 1-based position within the month.
    pub index: u32,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub working_days: u32,
    #[serde(default)]
    pub supplier: String,
    #[serde(default)]
    pub client: String,
}

impl WorkWeek {
    pub fn label(&self) -> String {
        format!(
            "Week {} ({}-{})",
            self.index,
            format_day_month(self.start),
            format_day_month(self.end)
        )
    }

    pub fn entry(&self, activity: Activity) -> &str {
        match activity {
            Activity::Supplier => &self.supplier,
            Activity::Client => &self.client,
        }
    }

    pub fn set_entry(&mut self, activity: Activity, text: impl Into<String>) {
        match activity {
            Activity::Supplier => self.supplier = text.into(),
            Activity::Client => self.client = text.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkPlan {
    pub weeks: Vec<WorkWeek>,
}

impl WorkPlan {
    /// Weeks of `period` that hold at least one working day.
    pub fn for_month(period: YearMonth, calendar: &SwissCalendar) -> ScheduleResult<Self> {
        let last = period.last_day();
        let mut weeks = Vec::new();
        let mut start = period.first_day();

        while start <= last {
            let to_sunday = 6 - i64::from(start.weekday().num_days_from_monday());
            let end = (start + Duration::days(to_sunday)).min(last);
            let working_days = calendar.working_days_between(start, end)?;
            if working_days > 0 {
                weeks.push(WorkWeek {
                    index: weeks.len() as u32 + 1,
                    start,
                    end,
                    working_days,
                    supplier: String::new(),
                    client: String::new(),
                });
            }
            start = end + Duration::days(1);
        }
        Ok(Self { weeks })
    }

    pub fn week(&self, index: u32) -> Option<&WorkWeek> {
        self.weeks.iter().find(|w| w.index == index)
    }

    pub fn week_mut(&mut self, index: u32) -> Option<&mut WorkWeek> {
        self.weeks.iter_mut().find(|w| w.index == index)
    }

    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyResult {
    /// 0-based position in the schedule.
    pub index: usize,
    pub period: YearMonth,
    pub label: String,
    pub working_days: u32,
    pub lump_sum: f64,
    pub milestone: NaiveDate,
    #[serde(default)]
    pub deliverables: String,
    #[serde(default)]
    pub work_plan: WorkPlan,
}

impl MonthlyResult {
    /// "M1 - March 2025 (31.03.2025)"
    pub fn milestone_label(&self, fmt: &dyn DateFormatter) -> String {
        format!(
            "M{} - {} ({})",
            self.index + 1,
            self.label,
            fmt.date(self.milestone)
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleTotals {
    pub working_days: u32,
    pub lump_sum: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    request: ScheduleRequest,
    months: Vec<MonthlyResult>,
    totals: ScheduleTotals,
}

impl Schedule {
    pub fn compute(
        request: &ScheduleRequest,
        calendar: &SwissCalendar,
        fmt: &dyn DateFormatter,
    ) -> ScheduleResult<Self> {
        request.validate()?;

        let mut months = Vec::with_capacity(request.duration_months as usize);
        let mut totals = ScheduleTotals::default();
        for (index, period) in request.periods()?.into_iter().enumerate() {
            let working_days = calendar.working_days_in_month(period)?;
            let milestone = calendar.last_working_day_of_month(period)?;
            let lump_sum = f64::from(working_days) * request.rate;
            debug!(%period, working_days, %milestone, lump_sum, "computed month");

            totals.working_days += working_days;
            totals.lump_sum += lump_sum;
            months.push(MonthlyResult {
                index,
                period,
                label: fmt.month_label(period),
                working_days,
                lump_sum,
                milestone,
                deliverables: String::new(),
                work_plan: WorkPlan::for_month(period, calendar)?,
            });
        }

        Ok(Self {
            request: request.clone(),
            months,
            totals,
        })
    }

    pub fn request(&self) -> &ScheduleRequest {
        &self.request
    }

    pub fn months(&self) -> &[MonthlyResult] {
        &self.months
    }

    pub fn month(&self, index: usize) -> Option<&MonthlyResult> {
        self.months.get(index)
    }

    pub fn month_mut(&mut self, index: usize) -> Option<&mut MonthlyResult> {
        self.months.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn totals(&self) -> ScheduleTotals {
        self.totals
    }

    /// Tabular view of the monthly breakdown.
    pub fn dataframe(&self, fmt: &dyn DateFormatter) -> PolarsResult<DataFrame> {
        let months: Vec<String> = self.months.iter().map(|m| m.label.clone()).collect();
        let milestones: Vec<String> = self.months.iter().map(|m| fmt.date(m.milestone)).collect();
        let days: Vec<u32> = self.months.iter().map(|m| m.working_days).collect();
        let sums: Vec<String> = self.months.iter().map(|m| fmt.currency(m.lump_sum)).collect();
        let weeks: Vec<u32> = self.months.iter().map(|m| m.work_plan.len() as u32).collect();
        let deliverables: Vec<String> = self.months.iter().map(|m| m.deliverables.clone()).collect();

        df!(
            "month" => months,
            "milestone" => milestones,
            "working_days" => days,
            "lump_sum" => sums,
            "weeks" => weeks,
            "deliverables" => deliverables
        )
    }

    pub fn to_cli_summary(&self, fmt: &dyn DateFormatter) -> String {
        let mut parts = Vec::new();
        parts.push(format!("months={}", self.months.len()));
        parts.push(format!("working_days={}", self.totals.working_days));
        parts.push(format!("total={}", fmt.currency(self.totals.lump_sum)));
        if let (Some(first), Some(last)) = (self.months.first(), self.months.last()) {
            parts.push(format!("span={}..{}", first.period, last.period));
        }
        parts.join(", ")
    }
}
