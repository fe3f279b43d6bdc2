// Sample batches - aligned timestamps and measurements
use crate::error::{ChartError, ChartResult};
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::Deserialize;

const NAIVE_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// A batch as it arrives from the page/server layer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBatch {
    pub timestamps: Vec<String>,
    #[serde(alias = "temperatures", alias = "durations")]
    pub primary: Vec<f64>,
    #[serde(default, alias = "humidities")]
    pub secondary: Option<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SampleBatch {
    timestamps: Vec<NaiveDateTime>,
    primary: Vec<f64>,
    secondary: Option<Vec<f64>>,
}

impl SampleBatch {
    pub fn new(
        timestamps: Vec<NaiveDateTime>,
        primary: Vec<f64>,
        secondary: Option<Vec<f64>>,
    ) -> ChartResult<Self> {
        if primary.len() != timestamps.len() {
            return Err(ChartError::invalid(format!(
                "primary series has {} values for {} timestamps",
                primary.len(),
                timestamps.len()
            )));
        }
        if let Some(secondary) = &secondary {
            if secondary.len() != timestamps.len() {
                return Err(ChartError::invalid(format!(
                    "secondary series has {} values for {} timestamps",
                    secondary.len(),
                    timestamps.len()
                )));
            }
        }

        let all_values = primary.iter().chain(secondary.iter().flatten());
        if let Some(bad) = all_values.copied().find(|v| !v.is_finite()) {
            return Err(ChartError::invalid(format!("non-finite sample value {bad}")));
        }

        Ok(Self {
            timestamps,
            primary,
            secondary,
        })
    }

    /// Parse timestamp strings; offset-bearing instants are shifted into `display_offset`.
    pub fn parse(raw: RawBatch, display_offset: &FixedOffset) -> ChartResult<Self> {
        let timestamps = raw
            .timestamps
            .iter()
            .map(|ts| parse_timestamp(ts, display_offset))
            .collect::<ChartResult<Vec<_>>>()?;
        Self::new(timestamps, raw.primary, raw.secondary)
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    pub fn primary(&self) -> &[f64] {
        &self.primary
    }

    pub fn secondary(&self) -> Option<&[f64]> {
        self.secondary.as_deref()
    }

    pub fn into_parts(self) -> (Vec<NaiveDateTime>, Vec<f64>, Option<Vec<f64>>) {
        (self.timestamps, self.primary, self.secondary)
    }
}

/// Accepts RFC 3339 or naive ISO-8601 (`T` or space separated).
pub fn parse_timestamp(raw: &str, display_offset: &FixedOffset) -> ChartResult<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(display_offset).naive_local());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| ChartError::invalid(format!("unparseable timestamp '{raw}'")))
}
