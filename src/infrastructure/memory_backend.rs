// In-memory chart backend - keeps the latest Chart.js document per widget
use crate::application::chart_backend::{ChartBackend, ChartHandle};
use crate::domain::chart::RenderableChartState;
use crate::error::{ChartError, ChartResult};
use crate::infrastructure::chartjs_mapper::state_to_chartjs;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone)]
struct RenderedChart {
    surface: String,
    document: Value,
    redraws: u64,
}

#[derive(Debug, Default)]
pub struct InMemoryChartBackend {
    next_handle: AtomicU64,
    charts: Mutex<HashMap<ChartHandle, RenderedChart>>,
    /// When set, only these surfaces exist.
    surfaces: Option<HashSet<String>>,
}

impl InMemoryChartBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_surfaces<I, S>(surfaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            surfaces: Some(surfaces.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    fn charts(&self) -> MutexGuard<'_, HashMap<ChartHandle, RenderedChart>> {
        self.charts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn document(&self, handle: ChartHandle) -> Option<Value> {
        self.charts().get(&handle).map(|c| c.document.clone())
    }

    pub fn surface(&self, handle: ChartHandle) -> Option<String> {
        self.charts().get(&handle).map(|c| c.surface.clone())
    }

    pub fn redraw_count(&self, handle: ChartHandle) -> Option<u64> {
        self.charts().get(&handle).map(|c| c.redraws)
    }

    pub fn chart_count(&self) -> usize {
        self.charts().len()
    }
}

impl ChartBackend for InMemoryChartBackend {
    fn construct(&self, surface: &str, state: &RenderableChartState) -> ChartResult<ChartHandle> {
        let surface = surface.trim();
        let known = match &self.surfaces {
            Some(surfaces) => surfaces.contains(surface),
            None => !surface.is_empty(),
        };
        if !known {
            return Err(ChartError::SurfaceUnavailable(surface.to_string()));
        }

        let mut charts = self.charts();
        if charts.values().any(|c| c.surface == surface) {
            return Err(ChartError::SurfaceUnavailable(format!(
                "{surface} already hosts a chart"
            )));
        }

        let handle = ChartHandle(self.next_handle.fetch_add(1, Ordering::Relaxed) + 1);
        charts.insert(
            handle,
            RenderedChart {
                surface: surface.to_string(),
                document: state_to_chartjs(state),
                redraws: 0,
            },
        );

        tracing::debug!(%handle, surface, "Constructed chart widget");
        Ok(handle)
    }

    fn redraw(&self, handle: ChartHandle, state: &RenderableChartState) -> ChartResult<()> {
        let mut charts = self.charts();
        let chart = charts
            .get_mut(&handle)
            .ok_or(ChartError::UnknownHandle(handle.0))?;
        chart.document = state_to_chartjs(state);
        chart.redraws += 1;
        Ok(())
    }

    fn destroy(&self, handle: ChartHandle) -> ChartResult<()> {
        self.charts()
            .remove(&handle)
            .map(|_| ())
            .ok_or(ChartError::UnknownHandle(handle.0))
    }
}
