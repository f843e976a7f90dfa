use chrono::{DateTime, Local, NaiveDate, Utc};

const ISO_DATE: &str = "%Y-%m-%d";
const SHORT_DATE: &str = "%m/%d/%Y";

/// Today's date in the local timezone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Format a date for the table and date inputs (YYYY-MM-DD)
pub fn format_date(date: NaiveDate) -> String {
    date.format(ISO_DATE).to_string()
}

/// Format a creation timestamp for the table (YYYY-MM-DD HH:MM, UTC)
pub fn format_datetime(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M").to_string()
}

/// Parse a date typed into the dialog.
/// Accepts YYYY-MM-DD as produced by date inputs, and MM/DD/YYYY.
pub fn parse_date_input(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, ISO_DATE)
        .or_else(|_| NaiveDate::parse_from_str(input, SHORT_DATE))
        .ok()
}
