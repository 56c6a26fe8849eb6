use super::{ExportError, ExportResult, sanitize_text};
use crate::format::{DateFormatter, group_thousands};
use crate::schedule::Schedule;
use std::fs;
use std::path::Path;
use tracing::info;

pub const MONTHLY_HEADER: [&str; 5] = ["Month", "Milestone", "Working Days", "Lump Sum", "Deliverables"];
pub const WORK_PLAN_HEADER: [&str; 4] = [
    "Milestone",
    "Week",
    "Supplier Activities",
    "Client Obligations",
];

fn amount(value: f64) -> String {
    group_thousands(value).replace(',', "")
}

fn finish(writer: ::csv::Writer<Vec<u8>>) -> ExportResult<String> {
    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Io(err.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

fn writer() -> ::csv::Writer<Vec<u8>> {
    ::csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new())
}

fn monthly_section(schedule: &Schedule, fmt: &dyn DateFormatter) -> ExportResult<String> {
    let mut w = writer();
    w.write_record(["Monthly Breakdown"])?;
    w.write_record(MONTHLY_HEADER)?;
    for month in schedule.months() {
        w.write_record([
            sanitize_text(&month.label),
            fmt.date(month.milestone),
            month.working_days.to_string(),
            amount(month.lump_sum),
            sanitize_text(&month.deliverables),
        ])?;
    }
    let totals = schedule.totals();
    w.write_record([
        "TOTAL".to_string(),
        String::new(),
        totals.working_days.to_string(),
        amount(totals.lump_sum),
        String::new(),
    ])?;
    finish(w)
}

fn work_plan_section(schedule: &Schedule, fmt: &dyn DateFormatter) -> ExportResult<String> {
    let mut w = writer();
    w.write_record(["Work Plan Breakdown"])?;
    w.write_record(WORK_PLAN_HEADER)?;
    for month in schedule.months() {
        let milestone = sanitize_text(&month.milestone_label(fmt));
        for week in &month.work_plan.weeks {
            w.write_record([
                milestone.clone(),
                week.label(),
                sanitize_text(&week.supplier),
                sanitize_text(&week.client),
            ])?;
        }
    }
    finish(w)
}

/// Two-section CSV: monthly breakdown with a TOTAL row, a blank line, then
/// the per-week work plan.
pub fn schedule_to_csv(schedule: &Schedule, fmt: &dyn DateFormatter) -> ExportResult<String> {
    let mut out = monthly_section(schedule, fmt)?;
    out.push('\n');
    out.push_str(&work_plan_section(schedule, fmt)?);
    Ok(out)
}

pub fn write_schedule_csv<P: AsRef<Path>>(
    schedule: &Schedule,
    fmt: &dyn DateFormatter,
    path: P,
) -> ExportResult<()> {
    let contents = schedule_to_csv(schedule, fmt)?;
    fs::write(path.as_ref(), contents)?;
    info!(path = %path.as_ref().display(), months = schedule.len(), "csv exported");
    Ok(())
}
