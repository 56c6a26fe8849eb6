use super::ExportResult;
use crate::schedule::Schedule;
use std::fs::File;
use std::path::Path;
use tracing::info;

pub fn schedule_to_json(schedule: &Schedule) -> ExportResult<String> {
    Ok(serde_json::to_string_pretty(schedule)?)
}

pub fn write_schedule_json<P: AsRef<Path>>(schedule: &Schedule, path: P) -> ExportResult<()> {
    let file = File::create(path.as_ref())?;
    serde_json::to_writer_pretty(file, schedule)?;
    info!(path = %path.as_ref().display(), "json exported");
    Ok(())
}
