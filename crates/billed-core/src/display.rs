//! Ordering and formatting used when bills are rendered as rows.

use chrono::{Datelike, NaiveDate};
use std::cmp::Ordering;

use crate::models::{Bill, BillStatus};

const FRENCH_MONTHS: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Jui", "Jui", "Aoû", "Sep", "Oct", "Nov", "Déc",
];

/// Descending lexical comparison of two date strings.
pub fn anti_chrono(a: &str, b: &str) -> Ordering {
    b.cmp(a)
}

/// Sort bills latest first by comparing their raw `date` strings. The sort is
/// stable, so bills sharing a date keep their original order.
pub fn sort_by_date_desc(bills: &mut [Bill]) {
    bills.sort_by(|a, b| anti_chrono(&a.date, &b.date));
}

/// Format a `YYYY-MM-DD` date as `"4 Avr. 04"`.
pub fn format_date(date: &str) -> Result<String, chrono::ParseError> {
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")?;
    let month = FRENCH_MONTHS[parsed.month0() as usize];
    let year = parsed.year().rem_euclid(100);
    Ok(format!("{} {}. {:02}", parsed.day(), month, year))
}

/// French label shown in the status column.
pub fn format_status(status: BillStatus) -> &'static str {
    match status {
        BillStatus::Pending => "En attente",
        BillStatus::Accepted => "Accepté",
        BillStatus::Refused => "Refusé",
    }
}
