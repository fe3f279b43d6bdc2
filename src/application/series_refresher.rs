// Series refresher - merges a new batch into an existing chart state
use crate::domain::chart::{RenderableChartState, HUMIDITY_INDEX};
use crate::domain::format::LabelFormatter;
use crate::domain::sample::SampleBatch;
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Default)]
pub struct SeriesRefresher {
    labels: LabelFormatter,
}

impl SeriesRefresher {
    pub fn new(labels: LabelFormatter) -> Self {
        Self { labels }
    }

    /// Replace labels and observed series in place and stretch reference lines
    /// over the new batch. The state is left untouched when the batch is rejected.
    pub fn refresh(&self, state: &mut RenderableChartState, batch: SampleBatch) -> ChartResult<()> {
        match (batch.secondary().is_some(), state.secondary().is_some()) {
            (true, false) => {
                return Err(ChartError::invalid(
                    "secondary series supplied but the chart has none",
                ));
            }
            (false, true) => {
                return Err(ChartError::invalid(
                    "chart holds a secondary series; refresh must supply it",
                ));
            }
            _ => {}
        }

        let len = batch.len();
        let labels = self.labels.time_labels(batch.timestamps());
        let tooltip_titles = self.labels.tooltip_titles(batch.timestamps());
        let (_, primary, secondary) = batch.into_parts();

        state.labels = labels;
        state.tooltip_titles = tooltip_titles;
        state.series[0].values = primary;
        if let Some(secondary) = secondary {
            state.series[HUMIDITY_INDEX].values = secondary;
        }

        if let Some(thresholds) = state.thresholds {
            for series in state.series.iter_mut() {
                if let Some(value) = thresholds.value_for(series.key) {
                    series.values = vec![value; len];
                }
            }
        }

        Ok(())
    }
}
