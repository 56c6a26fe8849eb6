use chrono::NaiveDate;
use payplan::{
    EnglishFormatter, Schedule, ScheduleError, ScheduleRequest, SwissCalendar, WorkPlan, YearMonth,
};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn ym(y: i32, m: u32) -> YearMonth {
    YearMonth::new(y, m).unwrap()
}

fn compute(rate: f64, start: YearMonth, months: u32) -> Result<Schedule, ScheduleError> {
    let calendar = SwissCalendar::new();
    let fmt = EnglishFormatter::default();
    Schedule::compute(&ScheduleRequest::new(rate, start, months), &calendar, &fmt)
}

#[test]
fn two_month_schedule() {
    let schedule = compute(500.0, ym(2025, 3), 2).unwrap();
    let months = schedule.months();
    assert_eq!(months.len(), 2);

    assert_eq!(months[0].label, "March 2025");
    assert_eq!(months[0].working_days, 21);
    assert_eq!(months[0].lump_sum, 10500.0);
    assert_eq!(months[0].milestone, d(2025, 3, 31));

    assert_eq!(months[1].label, "April 2025");
    assert_eq!(months[1].working_days, 20);
    assert_eq!(months[1].lump_sum, 10000.0);
    assert_eq!(months[1].milestone, d(2025, 4, 30));

    let totals = schedule.totals();
    assert_eq!(totals.working_days, 41);
    assert_eq!(totals.lump_sum, 20500.0);
}

#[test]
fn schedule_crosses_year_boundary() {
    let schedule = compute(100.0, ym(2025, 12), 2).unwrap();
    let periods: Vec<YearMonth> = schedule.months().iter().map(|m| m.period).collect();
    assert_eq!(periods, vec![ym(2025, 12), ym(2026, 1)]);
    assert_eq!(schedule.months()[1].working_days, 20);
    assert_eq!(schedule.months()[1].milestone, d(2026, 1, 30));
    assert_eq!(schedule.totals().working_days, 41);
}

#[test]
fn totals_equal_sum_of_rows() {
    let schedule = compute(812.35, ym(2024, 1), 18).unwrap();
    let days: u32 = schedule.months().iter().map(|m| m.working_days).sum();
    let sum: f64 = schedule.months().iter().map(|m| m.lump_sum).sum();
    assert_eq!(schedule.totals().working_days, days);
    assert!((schedule.totals().lump_sum - sum).abs() < 1e-6);
    for (i, month) in schedule.months().iter().enumerate() {
        assert_eq!(month.index, i);
        assert!(month.deliverables.is_empty());
    }
}

#[test]
fn rejects_invalid_requests() {
    assert_eq!(
        compute(-1.0, ym(2025, 1), 3).unwrap_err(),
        ScheduleError::InvalidRate(-1.0)
    );
    assert!(matches!(
        compute(f64::NAN, ym(2025, 1), 3),
        Err(ScheduleError::InvalidRate(_))
    ));
    assert_eq!(
        compute(100.0, ym(2025, 1), 0).unwrap_err(),
        ScheduleError::InvalidDuration(0)
    );
    assert_eq!(
        compute(100.0, ym(2025, 1), 241).unwrap_err(),
        ScheduleError::InvalidDuration(241)
    );
}

#[test]
fn zero_rate_is_allowed() {
    let schedule = compute(0.0, ym(2025, 1), 1).unwrap();
    assert_eq!(schedule.totals().lump_sum, 0.0);
    assert_eq!(schedule.totals().working_days, 21);
}

#[test]
fn work_weeks_skip_weeks_without_working_days() {
    let calendar = SwissCalendar::new();

    // March 1-2 2025 is a weekend; March 31 a lone Monday
    let march = WorkPlan::for_month(ym(2025, 3), &calendar).unwrap();
    let bounds: Vec<(NaiveDate, NaiveDate)> = march.weeks.iter().map(|w| (w.start, w.end)).collect();
    assert_eq!(
        bounds,
        vec![
            (d(2025, 3, 3), d(2025, 3, 9)),
            (d(2025, 3, 10), d(2025, 3, 16)),
            (d(2025, 3, 17), d(2025, 3, 23)),
            (d(2025, 3, 24), d(2025, 3, 30)),
            (d(2025, 3, 31), d(2025, 3, 31)),
        ]
    );
    assert_eq!(march.week(5).unwrap().working_days, 1);

    // Friday August 1 2025 is a holiday, so the first partial week drops out
    let august = WorkPlan::for_month(ym(2025, 8), &calendar).unwrap();
    assert_eq!(august.len(), 4);
    assert_eq!(august.week(1).unwrap().label(), "Week 1 (04.08-10.08)");
    let total: u32 = august.weeks.iter().map(|w| w.working_days).sum();
    assert_eq!(total, 20);
}

#[test]
fn milestone_label_and_summary() {
    let schedule = compute(500.0, ym(2025, 3), 2).unwrap();
    let fmt = EnglishFormatter::default();
    assert_eq!(
        schedule.months()[1].milestone_label(&fmt),
        "M2 - April 2025 (30.04.2025)"
    );
    assert_eq!(
        schedule.to_cli_summary(&fmt),
        "months=2, working_days=41, total=CHF 20,500.00, span=2025-03..2025-04"
    );
}

#[test]
fn dataframe_has_one_row_per_month() {
    let schedule = compute(500.0, ym(2025, 3), 3).unwrap();
    let df = schedule.dataframe(&EnglishFormatter::default()).unwrap();
    assert_eq!(df.height(), 3);
    assert_eq!(df.width(), 6);
}
