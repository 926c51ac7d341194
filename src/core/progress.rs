use chrono::NaiveDate;
use std::fmt;

/// Where today falls relative to a course's start and end dates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Progress {
    NotStarted,
    /// Percentage of elapsed days, 0 to 100.
    InProgress(f64),
    Finished,
    /// Start or end date is missing.
    NotConfigured,
}

impl Progress {
    pub fn compute(start: Option<NaiveDate>, end: Option<NaiveDate>, today: NaiveDate) -> Self {
        let (Some(start), Some(end)) = (start, end) else {
            return Progress::NotConfigured;
        };

        if today < start {
            Progress::NotStarted
        } else if today <= end {
            let total_days = (end - start).num_days();
            let elapsed_days = (today - start).num_days();
            let percentage = if total_days > 0 {
                elapsed_days as f64 / total_days as f64 * 100.0
            } else {
                100.0
            };
            Progress::InProgress(percentage)
        } else {
            Progress::Finished
        }
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Progress::NotStarted => f.write_str("🟡No iniciado"),
            Progress::InProgress(pct) => write!(f, "🟢En progreso ({:.1}%)", pct),
            Progress::Finished => f.write_str("🔴Terminado"),
            Progress::NotConfigured => f.write_str("🟠No Configurado"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn halfway_through_a_ten_day_course() {
        let progress = Progress::compute(Some(day(2024, 1, 1)), Some(day(2024, 1, 11)), day(2024, 1, 6));
        assert_eq!(progress, Progress::InProgress(50.0));
        assert!(progress.to_string().contains("En progreso (50.0%)"));
    }

    #[test]
    fn boundaries() {
        let start = Some(day(2024, 1, 1));
        let end = Some(day(2024, 1, 11));

        assert_eq!(Progress::compute(start, end, day(2023, 12, 31)).to_string(), "🟡No iniciado");
        assert_eq!(Progress::compute(start, end, day(2024, 1, 12)).to_string(), "🔴Terminado");
        assert_eq!(Progress::compute(start, end, day(2024, 1, 1)), Progress::InProgress(0.0));
        assert_eq!(Progress::compute(start, end, day(2024, 1, 11)), Progress::InProgress(100.0));
    }

    #[test]
    fn missing_boundary_is_not_configured() {
        let today = day(2024, 1, 6);
        assert_eq!(Progress::compute(None, Some(day(2024, 1, 11)), today).to_string(), "🟠No Configurado");
        assert_eq!(Progress::compute(Some(day(2024, 1, 1)), None, today), Progress::NotConfigured);
    }

    #[test]
    fn single_day_course_is_complete_on_that_day() {
        let d = day(2024, 4, 2);
        assert_eq!(Progress::compute(Some(d), Some(d), d).to_string(), "🟢En progreso (100.0%)");
    }

    #[test]
    fn one_decimal_place() {
        let progress = Progress::compute(Some(day(2024, 1, 1)), Some(day(2024, 1, 4)), day(2024, 1, 2));
        assert_eq!(progress.to_string(), "🟢En progreso (33.3%)");
    }
}
