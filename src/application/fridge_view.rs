// Fridge view - the temperature and door charts of one fridge detail page
use crate::application::chart_backend::ChartHandle;
use crate::application::chart_service::{ChartService, LiveChart};
use crate::domain::chart::{ChartKind, Thresholds};
use crate::domain::sample::RawBatch;
use crate::error::ChartResult;
use serde::{Deserialize, Serialize};

/// Everything the page layer supplies for one fridge on each cycle.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FridgeChartData {
    pub temperature: RawBatch,
    pub doors: RawBatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FridgeViewHandles {
    pub fridge_id: i64,
    pub temperature: ChartHandle,
    pub doors: ChartHandle,
}

#[derive(Debug, Clone)]
pub struct FridgeView {
    fridge_id: i64,
    temperature: LiveChart,
    doors: LiveChart,
}

pub fn temperature_surface(fridge_id: i64) -> String {
    format!("temperature-chart-{fridge_id}")
}

pub fn door_surface(fridge_id: i64) -> String {
    format!("door-chart-{fridge_id}")
}

impl FridgeView {
    /// Entry point called once the hosting page has mounted its surfaces.
    pub fn mount(
        service: &ChartService,
        fridge_id: i64,
        data: FridgeChartData,
        thresholds: Thresholds,
    ) -> ChartResult<Self> {
        let temperature = service.create_chart(
            &temperature_surface(fridge_id),
            ChartKind::TemperatureHumidity,
            data.temperature,
            Some(thresholds),
        )?;

        let doors = match service.create_chart(
            &door_surface(fridge_id),
            ChartKind::DoorDuration,
            data.doors,
            None,
        ) {
            Ok(chart) => chart,
            Err(e) => {
                if let Err(cleanup) = service.destroy_chart(temperature) {
                    tracing::warn!(fridge_id, "Failed to destroy temperature chart: {}", cleanup);
                }
                return Err(e);
            }
        };

        tracing::info!(fridge_id, "Fridge view mounted");
        Ok(Self {
            fridge_id,
            temperature,
            doors,
        })
    }

    pub fn fridge_id(&self) -> i64 {
        self.fridge_id
    }

    pub fn temperature(&self) -> &LiveChart {
        &self.temperature
    }

    pub fn doors(&self) -> &LiveChart {
        &self.doors
    }

    pub fn handles(&self) -> FridgeViewHandles {
        FridgeViewHandles {
            fridge_id: self.fridge_id,
            temperature: self.temperature.handle,
            doors: self.doors.handle,
        }
    }

    /// Both batches are validated before either chart changes. A chart's
    /// stored state only moves forward once it has been drawn.
    pub fn refresh(&mut self, service: &ChartService, data: FridgeChartData) -> ChartResult<()> {
        let temperature = service.refreshed_state(&self.temperature.state, data.temperature)?;
        let doors = service.refreshed_state(&self.doors.state, data.doors)?;

        service.redraw(self.temperature.handle, &temperature)?;
        self.temperature.state = temperature;
        service.redraw(self.doors.handle, &doors)?;
        self.doors.state = doors;

        tracing::debug!(fridge_id = self.fridge_id, "Fridge view refreshed");
        Ok(())
    }

    pub fn unmount(self, service: &ChartService) -> ChartResult<()> {
        let temperature = service.destroy_chart(self.temperature);
        let doors = service.destroy_chart(self.doors);
        tracing::info!(fridge_id = self.fridge_id, "Fridge view unmounted");
        temperature.and(doors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::chart_backend::ChartBackend;
    use crate::domain::chart::TARGET_INDEX;
    use crate::domain::format::LabelFormatter;
    use crate::error::ChartError;
    use crate::infrastructure::config::AxisSettings;
    use crate::infrastructure::memory_backend::InMemoryChartBackend;
    use std::sync::Arc;

    fn service_with(backend: Arc<InMemoryChartBackend>) -> ChartService {
        ChartService::new(backend, LabelFormatter::default(), AxisSettings::default())
    }

    fn data(n: usize) -> FridgeChartData {
        let timestamps: Vec<String> = (0..n)
            .map(|i| format!("2024-03-01T10:{:02}:00", i))
            .collect();
        FridgeChartData {
            temperature: RawBatch {
                timestamps: timestamps.clone(),
                primary: vec![4.5; n],
                secondary: Some(vec![60.0; n]),
            },
            doors: RawBatch {
                timestamps,
                primary: vec![15.0; n],
                secondary: None,
            },
        }
    }

    #[test]
    fn test_mount_refresh_unmount() {
        let backend = Arc::new(InMemoryChartBackend::new());
        let service = service_with(backend.clone());

        let mut view =
            FridgeView::mount(&service, 7, data(2), Thresholds::new(4.0, 2.0, 8.0)).unwrap();
        assert_eq!(backend.chart_count(), 2);
        assert_eq!(view.fridge_id(), 7);
        let handles = view.handles();
        assert_eq!(
            backend.surface(handles.temperature).as_deref(),
            Some("temperature-chart-7")
        );
        assert_eq!(backend.surface(handles.doors).as_deref(), Some("door-chart-7"));

        view.refresh(&service, data(4)).unwrap();
        assert_eq!(view.temperature().state.series[TARGET_INDEX].values, vec![4.0; 4]);
        assert_eq!(view.doors().state.len(), 4);

        view.unmount(&service).unwrap();
        assert_eq!(backend.chart_count(), 0);
    }

    #[test]
    fn test_failed_door_chart_unwinds_temperature_chart() {
        let backend = Arc::new(InMemoryChartBackend::with_surfaces(["temperature-chart-3"]));
        let service = service_with(backend.clone());

        let err = FridgeView::mount(&service, 3, data(1), Thresholds::new(4.0, 2.0, 8.0))
            .unwrap_err();

        assert!(matches!(err, ChartError::SurfaceUnavailable(_)));
        assert_eq!(backend.chart_count(), 0);
    }

    #[test]
    fn test_refresh_is_all_or_nothing() {
        let backend = Arc::new(InMemoryChartBackend::new());
        let service = service_with(backend.clone());
        let mut view =
            FridgeView::mount(&service, 1, data(2), Thresholds::new(4.0, 2.0, 8.0)).unwrap();

        let mut bad = data(3);
        bad.doors.primary.pop();
        assert!(view.refresh(&service, bad).is_err());

        assert_eq!(view.temperature().state.len(), 2);
        assert_eq!(view.doors().state.len(), 2);
        assert_eq!(backend.redraw_count(view.handles().temperature), Some(0));
    }

    #[test]
    fn test_failed_redraw_keeps_last_drawn_state() {
        let backend = Arc::new(InMemoryChartBackend::new());
        let service = service_with(backend.clone());
        let mut view =
            FridgeView::mount(&service, 5, data(2), Thresholds::new(4.0, 2.0, 8.0)).unwrap();
        let handles = view.handles();
        backend.destroy(handles.doors).unwrap();

        let err = view.refresh(&service, data(3)).unwrap_err();

        assert_eq!(err, ChartError::UnknownHandle(handles.doors.0));
        assert_eq!(view.temperature().state.len(), 3);
        let drawn = backend.document(handles.temperature).unwrap();
        assert_eq!(drawn["data"]["labels"].as_array().unwrap().len(), 3);
        assert_eq!(view.doors().state.len(), 2);
    }
}
