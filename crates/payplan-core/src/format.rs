use crate::month::YearMonth;
use chrono::{Datelike, NaiveDate};

/// Turns calendar values and amounts into display text.
///
/// Swapping the formatter changes labels without touching the calendar engine.
pub trait DateFormatter: Send + Sync {
    /// Month heading, e.g. "March 2025".
    fn month_label(&self, period: YearMonth) -> String;

    /// Milestone date, e.g. "31.03.2025".
    fn date(&self, date: NaiveDate) -> String;

    fn currency(&self, amount: f64) -> String;
}

/// English month names, dotted day-first dates, Swiss franc amounts.
#[derive(Debug, Clone)]
pub struct EnglishFormatter {
    currency_code: String,
}

impl Default for EnglishFormatter {
    fn default() -> Self {
        Self::with_currency("CHF")
    }
}

impl EnglishFormatter {
    pub fn with_currency(code: impl Into<String>) -> Self {
        Self {
            currency_code: code.into(),
        }
    }

    pub fn currency_code(&self) -> &str {
        &self.currency_code
    }
}

impl DateFormatter for EnglishFormatter {
    fn month_label(&self, period: YearMonth) -> String {
        format_month_label(period)
    }

    fn date(&self, date: NaiveDate) -> String {
        format_date_dmy(date)
    }

    fn currency(&self, amount: f64) -> String {
        format!("{} {}", self.currency_code, group_thousands(amount))
    }
}

pub fn format_month_label(period: YearMonth) -> String {
    format!("{} {}", period.month().name(), period.year())
}

pub fn format_date_dmy(date: NaiveDate) -> String {
    format!("{:02}.{:02}.{:04}", date.day(), date.month(), date.year())
}

/// "DD.MM", used for week ranges.
pub fn format_day_month(date: NaiveDate) -> String {
    format!("{:02}.{:02}", date.day(), date.month())
}

/// Two decimals with comma thousands separators: 12345.5 -> "12,345.50".
pub fn group_thousands(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && fixed.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{frac_part}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(0.0), "0.00");
        assert_eq!(group_thousands(999.999), "1,000.00");
        assert_eq!(group_thousands(1234567.5), "1,234,567.50");
        assert_eq!(group_thousands(-2500.0), "-2,500.00");
    }

    #[test]
    fn english_formatter_currency() {
        let fmt = EnglishFormatter::default();
        assert_eq!(fmt.currency(10500.0), "CHF 10,500.00");
        assert_eq!(EnglishFormatter::with_currency("EUR").currency(5.0), "EUR 5.00");
    }
}
