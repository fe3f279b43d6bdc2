// Display formatting for durations and time labels
use crate::error::{ChartError, ChartResult};
use chrono::{FixedOffset, NaiveDateTime, Offset, Utc};
use std::fmt::Write;

pub const DEFAULT_TIME_FORMAT: &str = "%H:%M";
const TIME_WITH_SECONDS: &str = "%H:%M:%S";
const DATE_AND_TIME: &str = "%Y-%m-%d %H:%M:%S";

/// Human-readable duration, e.g. `"2 min 5 sec"` or `"1 hr 1 min"`.
pub fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{} sec", seconds)
    } else if seconds < 3600 {
        format!("{} min {} sec", seconds / 60, seconds % 60)
    } else {
        format!("{} hr {} min", seconds / 3600, (seconds % 3600) / 60)
    }
}

/// Short form used for door-open tooltips, e.g. `"45 seconds"` or `"2m 5s"`.
pub fn format_duration_compact(seconds: u64) -> String {
    if seconds < 60 {
        format!("{} seconds", seconds)
    } else {
        format!("{}m {}s", seconds / 60, seconds % 60)
    }
}

/// Whole seconds of a measured duration; negative readings clamp to zero.
pub fn whole_seconds(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.round() as u64
    } else {
        0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelFormatter {
    time_format: String,
    offset: FixedOffset,
}

impl Default for LabelFormatter {
    fn default() -> Self {
        Self {
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            offset: Utc.fix(),
        }
    }
}

impl LabelFormatter {
    pub fn new(time_format: &str, utc_offset_minutes: i32) -> ChartResult<Self> {
        // Labels are rendered from naive timestamps, so zone items fail too.
        let mut rendered = String::new();
        write!(rendered, "{}", NaiveDateTime::default().format(time_format)).map_err(|_| {
            ChartError::invalid(format!("invalid label format '{time_format}'"))
        })?;
        let offset = utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                ChartError::invalid(format!("invalid UTC offset {utc_offset_minutes} min"))
            })?;

        Ok(Self {
            time_format: time_format.to_string(),
            offset,
        })
    }

    pub fn offset(&self) -> &FixedOffset {
        &self.offset
    }

    /// Axis label for one sample (hour:minute by default).
    pub fn time_label(&self, ts: &NaiveDateTime) -> String {
        ts.format(&self.time_format).to_string()
    }

    pub fn time_labels(&self, timestamps: &[NaiveDateTime]) -> Vec<String> {
        timestamps.iter().map(|ts| self.time_label(ts)).collect()
    }

    pub fn tooltip_titles(&self, timestamps: &[NaiveDateTime]) -> Vec<String> {
        timestamps
            .iter()
            .map(|ts| self.format_timestamp(ts, true))
            .collect()
    }

    pub fn format_timestamp(&self, ts: &NaiveDateTime, include_date: bool) -> String {
        if include_date {
            ts.format(DATE_AND_TIME).to_string()
        } else {
            ts.format(TIME_WITH_SECONDS).to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 7, 42)
            .unwrap()
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0 sec");
        assert_eq!(format_duration(45), "45 sec");
        assert_eq!(format_duration(60), "1 min 0 sec");
        assert_eq!(format_duration(125), "2 min 5 sec");
        assert_eq!(format_duration(3599), "59 min 59 sec");
        assert_eq!(format_duration(3600), "1 hr 0 min");
        assert_eq!(format_duration(3661), "1 hr 1 min");
    }

    #[test]
    fn test_format_duration_compact() {
        assert_eq!(format_duration_compact(45), "45 seconds");
        assert_eq!(format_duration_compact(125), "2m 5s");
        assert_eq!(format_duration_compact(3661), "61m 1s");
    }

    #[test]
    fn test_whole_seconds_clamps() {
        assert_eq!(whole_seconds(12.6), 13);
        assert_eq!(whole_seconds(-3.0), 0);
    }

    #[test]
    fn test_time_label_defaults_to_hour_minute() {
        let formatter = LabelFormatter::default();
        assert_eq!(formatter.time_label(&sample_time()), "09:07");
        assert_eq!(formatter.format_timestamp(&sample_time(), false), "09:07:42");
        assert_eq!(
            formatter.format_timestamp(&sample_time(), true),
            "2024-03-01 09:07:42"
        );
    }

    #[test]
    fn test_custom_label_format() {
        let formatter = LabelFormatter::new("%I:%M %p", 0).unwrap();
        assert_eq!(formatter.time_label(&sample_time()), "09:07 AM");
    }

    #[test]
    fn test_rejects_bad_format_and_offset() {
        assert!(LabelFormatter::new("%Q", 0).is_err());
        assert!(LabelFormatter::new("%H:%M %z", 0).is_err());
        assert!(LabelFormatter::new("%H:%M %Z", 0).is_err());
        assert!(LabelFormatter::new("%H:%M", 24 * 60).is_err());
        assert!(LabelFormatter::new("%H:%M", -300).is_ok());
    }
}
