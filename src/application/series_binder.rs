// Series binder - turns a sample batch into a renderable chart state
use crate::domain::chart::{
    Axes, AxisSpec, ChartKind, RenderableChartState, Series, SeriesKey, Thresholds,
};
use crate::domain::format::LabelFormatter;
use crate::domain::sample::SampleBatch;
use crate::error::{ChartError, ChartResult};
use crate::infrastructure::config::AxisSettings;

#[derive(Debug, Clone, Default)]
pub struct SeriesBinder {
    labels: LabelFormatter,
    axes: AxisSettings,
}

impl SeriesBinder {
    pub fn new(labels: LabelFormatter, axes: AxisSettings) -> Self {
        Self { labels, axes }
    }

    pub fn labels(&self) -> &LabelFormatter {
        &self.labels
    }

    pub fn bind(
        &self,
        kind: ChartKind,
        batch: SampleBatch,
        thresholds: Option<Thresholds>,
    ) -> ChartResult<RenderableChartState> {
        if batch.is_empty() {
            return Err(ChartError::invalid("cannot bind a chart to an empty batch"));
        }

        let labels = self.labels.time_labels(batch.timestamps());
        let tooltip_titles = self.labels.tooltip_titles(batch.timestamps());
        let (_, primary, secondary) = batch.into_parts();

        match kind {
            ChartKind::TemperatureHumidity => {
                let humidity = secondary.ok_or_else(|| {
                    ChartError::invalid("temperature chart requires a humidity series")
                })?;
                let thresholds = thresholds.ok_or_else(|| {
                    ChartError::invalid("temperature chart requires target/min/max thresholds")
                })?;

                let len = primary.len();
                let axes = self.temperature_axes(&primary, &thresholds);
                let series = vec![
                    Series::observed(SeriesKey::Temperature, primary),
                    Series::observed(SeriesKey::Humidity, humidity),
                    Series::reference(SeriesKey::Target, thresholds.target, len),
                    Series::reference(SeriesKey::Min, thresholds.min, len),
                    Series::reference(SeriesKey::Max, thresholds.max, len),
                ];

                Ok(RenderableChartState {
                    kind,
                    labels,
                    tooltip_titles,
                    series,
                    axes,
                    thresholds: Some(thresholds),
                })
            }
            ChartKind::DoorDuration => {
                if secondary.is_some() {
                    return Err(ChartError::invalid(
                        "door-duration chart takes a single series",
                    ));
                }
                if thresholds.is_some() {
                    tracing::debug!("Ignoring thresholds supplied for a door-duration chart");
                }

                Ok(RenderableChartState {
                    kind,
                    labels,
                    tooltip_titles,
                    series: vec![Series::observed(SeriesKey::DoorDuration, primary)],
                    axes: Self::door_axes(),
                    thresholds: None,
                })
            }
        }
    }

    fn temperature_axes(&self, temperatures: &[f64], thresholds: &Thresholds) -> Axes {
        let lowest = temperatures.iter().copied().fold(f64::INFINITY, f64::min);
        let highest = temperatures.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let left = AxisSpec {
            suggested_min: Some((thresholds.min - self.axes.padding).min(lowest)),
            suggested_max: Some((thresholds.max + self.axes.padding).max(highest)),
            ..AxisSpec::titled(SeriesKey::Temperature.label())
        };
        let right = AxisSpec {
            min: Some(self.axes.humidity_min),
            max: Some(self.axes.humidity_max),
            ..AxisSpec::titled(SeriesKey::Humidity.label())
        };

        Axes {
            left,
            right: Some(right),
        }
    }

    fn door_axes() -> Axes {
        Axes {
            left: AxisSpec {
                begin_at_zero: true,
                ..AxisSpec::titled("Duration (seconds)")
            },
            right: None,
        }
    }
}
