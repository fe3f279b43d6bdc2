// Application state for HTTP handlers
use crate::application::chart_backend::ChartHandle;
use crate::application::chart_service::{ChartService, LiveChart};
use crate::application::fridge_view::FridgeView;
use crate::domain::chart::Thresholds;
use crate::infrastructure::memory_backend::InMemoryChartBackend;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

pub struct AppState {
    pub chart_service: ChartService,
    pub backend: Arc<InMemoryChartBackend>,
    pub default_thresholds: Thresholds,
    // One lock per registry serializes refreshes of the same chart.
    pub charts: Mutex<HashMap<ChartHandle, LiveChart>>,
    pub views: Mutex<HashMap<i64, FridgeView>>,
}

impl AppState {
    pub fn new(
        chart_service: ChartService,
        backend: Arc<InMemoryChartBackend>,
        default_thresholds: Thresholds,
    ) -> Self {
        Self {
            chart_service,
            backend,
            default_thresholds,
            charts: Mutex::new(HashMap::new()),
            views: Mutex::new(HashMap::new()),
        }
    }
}
