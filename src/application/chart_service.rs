// Chart service - binds batches, drives the backend and refreshes live charts
use crate::application::chart_backend::{ChartBackend, ChartHandle};
use crate::application::series_binder::SeriesBinder;
use crate::application::series_refresher::SeriesRefresher;
use crate::domain::chart::{ChartKind, RenderableChartState, Thresholds};
use crate::domain::format::LabelFormatter;
use crate::domain::sample::{RawBatch, SampleBatch};
use crate::error::ChartResult;
use crate::infrastructure::config::AxisSettings;
use serde::Serialize;
use std::sync::Arc;

/// A chart state together with the widget it is drawn on.
#[derive(Debug, Clone, Serialize)]
pub struct LiveChart {
    pub handle: ChartHandle,
    pub surface: String,
    pub state: RenderableChartState,
}

#[derive(Clone)]
pub struct ChartService {
    backend: Arc<dyn ChartBackend>,
    binder: SeriesBinder,
    refresher: SeriesRefresher,
}

impl ChartService {
    pub fn new(backend: Arc<dyn ChartBackend>, labels: LabelFormatter, axes: AxisSettings) -> Self {
        Self {
            backend,
            binder: SeriesBinder::new(labels.clone(), axes),
            refresher: SeriesRefresher::new(labels),
        }
    }

    pub fn parse_batch(&self, raw: RawBatch) -> ChartResult<SampleBatch> {
        SampleBatch::parse(raw, self.binder.labels().offset())
    }

    /// Bind `batch` and construct a widget for it. Nothing is constructed
    /// when binding fails.
    pub fn create_chart(
        &self,
        surface: &str,
        kind: ChartKind,
        batch: RawBatch,
        thresholds: Option<Thresholds>,
    ) -> ChartResult<LiveChart> {
        let batch = self.parse_batch(batch)?;
        let samples = batch.len();
        let state = self.binder.bind(kind, batch, thresholds)?;
        let handle = self.backend.construct(surface, &state)?;

        tracing::info!(%handle, surface, ?kind, samples, "Chart created");

        Ok(LiveChart {
            handle,
            surface: surface.to_string(),
            state,
        })
    }

    pub fn refresh_chart(&self, chart: &mut LiveChart, batch: RawBatch) -> ChartResult<()> {
        let batch = self.parse_batch(batch)?;
        let samples = batch.len();
        self.refresher.refresh(&mut chart.state, batch)?;
        self.backend.redraw(chart.handle, &chart.state)?;

        tracing::debug!(handle = %chart.handle, samples, "Chart refreshed");
        Ok(())
    }

    /// Refreshed copy of `state`; nothing is drawn.
    pub fn refreshed_state(
        &self,
        state: &RenderableChartState,
        batch: RawBatch,
    ) -> ChartResult<RenderableChartState> {
        let batch = self.parse_batch(batch)?;
        let mut next = state.clone();
        self.refresher.refresh(&mut next, batch)?;
        Ok(next)
    }

    pub fn redraw(&self, handle: ChartHandle, state: &RenderableChartState) -> ChartResult<()> {
        self.backend.redraw(handle, state)
    }

    pub fn destroy_chart(&self, chart: LiveChart) -> ChartResult<()> {
        self.backend.destroy(chart.handle)?;
        tracing::info!(handle = %chart.handle, surface = %chart.surface, "Chart destroyed");
        Ok(())
    }
}
