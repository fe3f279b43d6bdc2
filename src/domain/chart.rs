// Chart domain models
use serde::{Deserialize, Serialize};

/// Series positions of a temperature/humidity chart.
pub const TEMPERATURE_INDEX: usize = 0;
pub const HUMIDITY_INDEX: usize = 1;
pub const TARGET_INDEX: usize = 2;
pub const MIN_INDEX: usize = 3;
pub const MAX_INDEX: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    TemperatureHumidity,
    DoorDuration,
}

impl ChartKind {
    pub fn has_secondary(self) -> bool {
        matches!(self, Self::TemperatureHumidity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub target: f64,
    pub min: f64,
    pub max: f64,
}

impl Thresholds {
    pub fn new(target: f64, min: f64, max: f64) -> Self {
        Self { target, min, max }
    }

    /// Constant carried by a reference series, `None` for observed series.
    pub fn value_for(&self, key: SeriesKey) -> Option<f64> {
        match key {
            SeriesKey::Target => Some(self.target),
            SeriesKey::Min => Some(self.min),
            SeriesKey::Max => Some(self.max),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKey {
    Temperature,
    Humidity,
    Target,
    Min,
    Max,
    DoorDuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesRole {
    Observed,
    Reference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisSide {
    Left,
    Right,
}

impl SeriesKey {
    pub fn label(self) -> &'static str {
        match self {
            Self::Temperature => "Temperature (°C)",
            Self::Humidity => "Humidity (%)",
            Self::Target => "Target",
            Self::Min => "Min",
            Self::Max => "Max",
            Self::DoorDuration => "Door Open Duration (seconds)",
        }
    }

    pub fn role(self) -> SeriesRole {
        match self {
            Self::Target | Self::Min | Self::Max => SeriesRole::Reference,
            _ => SeriesRole::Observed,
        }
    }

    pub fn axis(self) -> AxisSide {
        match self {
            Self::Humidity => AxisSide::Right,
            _ => AxisSide::Left,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub key: SeriesKey,
    pub values: Vec<f64>,
}

impl Series {
    pub fn observed(key: SeriesKey, values: Vec<f64>) -> Self {
        Self { key, values }
    }

    /// Constant-valued guide line spanning `len` samples.
    pub fn reference(key: SeriesKey, value: f64, len: usize) -> Self {
        Self {
            key,
            values: vec![value; len],
        }
    }

    pub fn label(&self) -> &'static str {
        self.key.label()
    }

    pub fn role(&self) -> SeriesRole {
        self.key.role()
    }

    pub fn is_reference(&self) -> bool {
        self.role() == SeriesRole::Reference
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AxisSpec {
    pub title: String,
    pub suggested_min: Option<f64>,
    pub suggested_max: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub begin_at_zero: bool,
}

impl AxisSpec {
    pub fn titled(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axes {
    pub left: AxisSpec,
    pub right: Option<AxisSpec>,
}

/// Labels, series and axis hints handed to a chart backend.
///
/// For [`ChartKind::TemperatureHumidity`] the series are always laid out as
/// temperature, humidity, target, min, max (see the `*_INDEX` constants).
/// A door chart holds a single duration series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderableChartState {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub tooltip_titles: Vec<String>,
    pub series: Vec<Series>,
    pub axes: Axes,
    pub thresholds: Option<Thresholds>,
}

impl RenderableChartState {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn primary(&self) -> &Series {
        &self.series[0]
    }

    pub fn secondary(&self) -> Option<&Series> {
        if self.kind.has_secondary() {
            self.series.get(HUMIDITY_INDEX)
        } else {
            None
        }
    }

    pub fn series_by_key(&self, key: SeriesKey) -> Option<&Series> {
        self.series.iter().find(|s| s.key == key)
    }

    pub fn reference_series(&self) -> impl Iterator<Item = &Series> {
        self.series.iter().filter(|s| s.is_reference())
    }
}
