use std::fmt;
use std::fmt::Write;
use std::str::FromStr;

use log::info;

use crate::core::aggregator::CourseAggregator;
use crate::error::CanvasError;
use crate::model::course_record::{COLUMNS, CourseRecord};

pub const EMPTY_REPORT_MESSAGE: &str = "No se encontró información para los cursos ingresados.";

/// Rows in the same order as the requested ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub rows: Vec<CourseRecord>,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn error_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_error()).count()
    }
}

/// Runs the aggregator once per id, sequentially. Duplicate ids give duplicate rows.
pub async fn build_report(aggregator: &CourseAggregator<'_>, course_ids: &[String]) -> Report {
    let mut rows = Vec::with_capacity(course_ids.len());
    for (i, course_id) in course_ids.iter().enumerate() {
        info!("[{}/{}] curso {}", i + 1, course_ids.len(), course_id);
        rows.push(aggregator.aggregate(course_id).await);
    }
    Report { rows }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Aligned plain-text columns
    #[default]
    Table,
    /// GitHub-flavored Markdown table
    Markdown,
    /// Array of objects keyed by column header
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "text" => Ok(Self::Table),
            "md" | "markdown" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            _ => Err(format!("formato desconocido: {s}")),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Markdown => write!(f, "markdown"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Renders the report. An empty report renders as the "no results" message
/// in every format.
pub fn render(report: &Report, format: ReportFormat) -> Result<String, CanvasError> {
    if report.is_empty() {
        return Ok(format!("{EMPTY_REPORT_MESSAGE}\n"));
    }
    match format {
        ReportFormat::Table => Ok(render_table(&report.rows)),
        ReportFormat::Markdown => Ok(render_markdown(&report.rows)),
        ReportFormat::Json => Ok(serde_json::to_string_pretty(&report.rows)? + "\n"),
    }
}

fn render_table(rows: &[CourseRecord]) -> String {
    let mut widths: Vec<usize> = COLUMNS.iter().map(|c| c.chars().count()).collect();
    for row in rows {
        for (width, value) in widths.iter_mut().zip(row.values()) {
            *width = (*width).max(value.chars().count());
        }
    }

    let mut out = String::new();
    push_aligned(&mut out, &COLUMNS, &widths);
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let separator: Vec<&str> = separator.iter().map(String::as_str).collect();
    push_aligned(&mut out, &separator, &widths);
    for row in rows {
        push_aligned(&mut out, &row.values(), &widths);
    }
    out
}

fn push_aligned(out: &mut String, cells: &[&str], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

fn render_markdown(rows: &[CourseRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "| {} |", COLUMNS.join(" | "));
    let _ = writeln!(out, "|{}", "---|".repeat(COLUMNS.len()));
    for row in rows {
        let cells: Vec<String> = row.values().iter().map(|v| v.replace('|', "\\|")).collect();
        let _ = writeln!(out, "| {} |", cells.join(" | "));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rows() -> Vec<CourseRecord> {
        vec![
            CourseRecord::unavailable("1", "❌ Error al obtener curso 1", "https://c.test/courses/1"),
            CourseRecord::unavailable("22", "A | B", "https://c.test/courses/22"),
        ]
    }

    #[test]
    fn empty_report_prints_message_in_every_format() {
        let report = Report::default();
        for format in [ReportFormat::Table, ReportFormat::Markdown, ReportFormat::Json] {
            assert_eq!(render(&report, format).unwrap(), format!("{EMPTY_REPORT_MESSAGE}\n"));
        }
    }

    #[test]
    fn table_has_header_separator_and_one_line_per_row() {
        let report = Report { rows: sample_rows() };
        let text = render(&report, ReportFormat::Table).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2 + report.len());
        assert!(lines[0].starts_with("Tipo"));
        assert!(lines[1].starts_with("----"));
        assert!(lines[3].contains("https://c.test/courses/22"));
    }

    #[test]
    fn markdown_escapes_pipes() {
        let report = Report { rows: sample_rows() };
        let text = render(&report, ReportFormat::Markdown).unwrap();

        assert!(text.starts_with("| Tipo | Cuenta |"));
        assert!(text.contains("A \\| B"));
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn json_is_an_array_of_rows() {
        let report = Report { rows: sample_rows() };
        let text = render(&report, ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[1]["ID Dictación"], "22");
    }

    #[test]
    fn format_names() {
        assert_eq!("MD".parse::<ReportFormat>(), Ok(ReportFormat::Markdown));
        assert_eq!("table".parse::<ReportFormat>(), Ok(ReportFormat::Table));
        assert!("csv".parse::<ReportFormat>().is_err());
        assert_eq!(ReportFormat::Json.to_string(), "json");
    }

    #[test]
    fn error_rows_are_counted() {
        let report = Report { rows: sample_rows() };
        assert_eq!(report.error_count(), 2);
    }
}
