use chrono::{DateTime, NaiveDateTime};
use chrono_tz::Tz;

use crate::model::canvas::Assignment;

const CANVAS_TIMESTAMP: &str = "%Y-%m-%dT%H:%M:%SZ";
const DISPLAY_DATE: &str = "%d-%m-%Y";

/// Parses a Canvas UTC timestamp into the given zone.
pub fn parse_canvas_timestamp(raw: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    NaiveDateTime::parse_from_str(raw.trim(), CANVAS_TIMESTAMP)
        .ok()
        .map(|naive| naive.and_utc().with_timezone(tz))
}

pub fn format_date(date: &DateTime<Tz>) -> String {
    date.format(DISPLAY_DATE).to_string()
}

/// Latest `due_at` among the assignments. Missing or unparseable dates are skipped.
pub fn latest_due_date(assignments: &[Assignment], tz: &Tz) -> Option<DateTime<Tz>> {
    assignments
        .iter()
        .filter_map(|a| a.due_at.as_deref())
        .filter_map(|raw| parse_canvas_timestamp(raw, tz))
        .max()
}
