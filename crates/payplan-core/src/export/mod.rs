pub mod csv;
pub mod json;

use crate::schedule::Schedule;
use thiserror::Error;

pub use self::csv::{schedule_to_csv, write_schedule_csv};
pub use self::json::{schedule_to_json, write_schedule_json};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] ::csv::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("export produced invalid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type ExportResult<T> = Result<T, ExportError>;

/// "payment_schedule_2025-03.csv" for a schedule starting March 2025.
pub fn default_file_name(schedule: &Schedule, extension: &str) -> String {
    format!("payment_schedule_{}.{extension}", schedule.request().start)
}

/// Keeps free text inside one CSV column: commas become semicolons and
/// line breaks collapse to a single space.
pub fn sanitize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_break = false;
    for ch in text.chars() {
        match ch {
            '\r' | '\n' => {
                if !in_break {
                    out.push(' ');
                }
                in_break = true;
                continue;
            }
            ',' => out.push(';'),
            other => out.push(other),
        }
        in_break = false;
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::sanitize_text;

    #[test]
    fn sanitize_replaces_commas_and_collapses_newlines() {
        assert_eq!(sanitize_text("a, b\r\n\nc"), "a; b c");
        assert_eq!(sanitize_text("\nleading\n"), "leading");
        assert_eq!(sanitize_text(""), "");
    }
}
