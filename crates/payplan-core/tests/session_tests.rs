use payplan::{Activity, ScheduleError, ScheduleRequest, Session, SessionError, YearMonth};

fn request(rate: f64, start: &str, months: u32) -> ScheduleRequest {
    ScheduleRequest::new(rate, start.parse::<YearMonth>().unwrap(), months)
}

#[test]
fn edits_require_a_schedule() {
    let mut session = Session::new();
    assert!(session.schedule().is_none());
    assert_eq!(
        session.set_deliverables(0, "x"),
        Err(SessionError::NoSchedule)
    );
    assert_eq!(
        session.require_schedule().unwrap_err(),
        SessionError::NoSchedule
    );
}

#[test]
fn submit_then_edit_free_text() {
    let mut session = Session::new();
    session.submit(&request(500.0, "2025-03", 2)).unwrap();

    session.set_deliverables(1, "Prototype").unwrap();
    session
        .set_work_plan_entry(0, 2, Activity::Supplier, "Build API")
        .unwrap();
    session
        .set_work_plan_entry(0, 2, Activity::Client, "Review specs")
        .unwrap();

    let schedule = session.schedule().unwrap();
    assert_eq!(schedule.months()[1].deliverables, "Prototype");
    let week = schedule.months()[0].work_plan.week(2).unwrap();
    assert_eq!(week.entry(Activity::Supplier), "Build API");
    assert_eq!(week.entry(Activity::Client), "Review specs");
    // totals are not affected by free-text edits
    assert_eq!(schedule.totals().working_days, 41);
}

#[test]
fn out_of_range_edits_are_rejected() {
    let mut session = Session::new();
    session.submit(&request(500.0, "2025-08", 1)).unwrap();

    assert_eq!(
        session.set_deliverables(3, "x"),
        Err(SessionError::MonthOutOfRange { index: 3, len: 1 })
    );
    assert_eq!(
        session.set_work_plan_entry(0, 5, Activity::Client, "x"),
        Err(SessionError::WeekOutOfRange {
            index: 0,
            week: 5,
            weeks: 4
        })
    );
}

#[test]
fn resubmission_replaces_results() {
    let mut session = Session::new();
    session.submit(&request(500.0, "2025-03", 2)).unwrap();
    session.set_deliverables(0, "Old").unwrap();

    session.submit(&request(200.0, "2026-01", 1)).unwrap();
    let schedule = session.schedule().unwrap();
    assert_eq!(schedule.len(), 1);
    assert_eq!(schedule.months()[0].label, "January 2026");
    assert!(schedule.months()[0].deliverables.is_empty());
    assert_eq!(schedule.totals().lump_sum, 4000.0);
}

#[test]
fn failed_submission_keeps_previous_results() {
    let mut session = Session::new();
    session.submit(&request(500.0, "2025-03", 2)).unwrap();

    let err = session.submit(&request(500.0, "2025-03", 0)).unwrap_err();
    assert_eq!(err, SessionError::Schedule(ScheduleError::InvalidDuration(0)));
    assert_eq!(session.schedule().unwrap().len(), 2);

    session.clear();
    assert!(session.schedule().is_none());
}

#[test]
fn submission_prepares_calendar_years() {
    let mut session = Session::new();
    session.submit(&request(100.0, "2025-11", 3)).unwrap();
    assert_eq!(session.calendar().cached_years(), vec![2025, 2026]);
}

#[test]
fn calendar_cache_holds_one_entry_per_year() {
    let mut session = Session::new();
    session.submit(&request(100.0, "2025-11", 3)).unwrap();
    session.submit(&request(100.0, "2025-03", 2)).unwrap();
    session.submit(&request(100.0, "2026-01", 1)).unwrap();
    session.clear();
    assert_eq!(session.calendar().cached_years(), vec![2025, 2026]);

    session.submit(&request(100.0, "2025-12", 14)).unwrap();
    assert_eq!(session.calendar().cached_years(), vec![2025, 2026, 2027]);
}
