// HTTP request handlers
use crate::application::chart_backend::ChartHandle;
use crate::application::chart_service::LiveChart;
use crate::application::fridge_view::{FridgeChartData, FridgeView, FridgeViewHandles};
use crate::domain::chart::{ChartKind, Thresholds};
use crate::domain::sample::RawBatch;
use crate::error::ChartError;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct CreateChartRequest {
    pub surface: String,
    pub kind: ChartKind,
    pub batch: RawBatch,
    #[serde(default)]
    pub thresholds: Option<Thresholds>,
}

#[derive(Debug, Deserialize)]
pub struct MountViewRequest {
    #[serde(flatten)]
    pub data: FridgeChartData,
    #[serde(default)]
    pub thresholds: Option<Thresholds>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Create a chart; temperature charts fall back to the configured fridge thresholds
pub async fn create_chart(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateChartRequest>,
) -> Result<(StatusCode, Json<LiveChart>), ChartError> {
    let thresholds = match request.kind {
        ChartKind::TemperatureHumidity => {
            Some(request.thresholds.unwrap_or(state.default_thresholds))
        }
        ChartKind::DoorDuration => request.thresholds,
    };

    let mut charts = state.charts.lock().await;
    let chart = state.chart_service.create_chart(
        &request.surface,
        request.kind,
        request.batch,
        thresholds,
    )?;
    charts.insert(chart.handle, chart.clone());

    Ok((StatusCode::CREATED, Json(chart)))
}

/// Latest rendered Chart.js document for a widget
pub async fn get_chart(
    Path(handle): Path<u64>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, ChartError> {
    state
        .backend
        .document(ChartHandle(handle))
        .map(Json)
        .ok_or(ChartError::UnknownHandle(handle))
}

pub async fn refresh_chart(
    Path(handle): Path<u64>,
    State(state): State<Arc<AppState>>,
    Json(batch): Json<RawBatch>,
) -> Result<Json<LiveChart>, ChartError> {
    let mut charts = state.charts.lock().await;
    let chart = charts
        .get_mut(&ChartHandle(handle))
        .ok_or(ChartError::UnknownHandle(handle))?;

    state.chart_service.refresh_chart(chart, batch)?;
    Ok(Json(chart.clone()))
}

pub async fn delete_chart(
    Path(handle): Path<u64>,
    State(state): State<Arc<AppState>>,
) -> Result<StatusCode, ChartError> {
    let mut charts = state.charts.lock().await;
    let chart = charts
        .get(&ChartHandle(handle))
        .cloned()
        .ok_or(ChartError::UnknownHandle(handle))?;

    // Deregister only once the widget is gone.
    state.chart_service.destroy_chart(chart)?;
    charts.remove(&ChartHandle(handle));
    Ok(StatusCode::NO_CONTENT)
}

/// Mount the temperature and door charts of a fridge detail page
pub async fn mount_view(
    Path(fridge_id): Path<i64>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<MountViewRequest>,
) -> Result<(StatusCode, Json<FridgeViewHandles>), ChartError> {
    let thresholds = request.thresholds.unwrap_or(state.default_thresholds);

    let mut views = state.views.lock().await;
    let view = FridgeView::mount(&state.chart_service, fridge_id, request.data, thresholds)?;
    let handles = view.handles();
    views.insert(fridge_id, view);

    Ok((StatusCode::CREATED, Json(handles)))
}

pub async fn refresh_view(
    Path(fridge_id): Path<i64>,
    State(state): State<Arc<AppState>>,
    Json(data): Json<FridgeChartData>,
) -> Result<Json<FridgeViewHandles>, ChartError> {
    let mut views = state.views.lock().await;
    let view = views
        .get_mut(&fridge_id)
        .ok_or_else(|| ChartError::NotFound(format!("no view mounted for fridge {fridge_id}")))?;

    view.refresh(&state.chart_service, data)?;
    Ok(Json(view.handles()))
}

pub async fn unmount_view(
    Path(fridge_id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> Result<StatusCode, ChartError> {
    let view = state
        .views
        .lock()
        .await
        .remove(&fridge_id)
        .ok_or_else(|| ChartError::NotFound(format!("no view mounted for fridge {fridge_id}")))?;

    view.unmount(&state.chart_service)?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::chart_backend::ChartBackend;
    use crate::application::chart_service::ChartService;
    use crate::domain::format::LabelFormatter;
    use crate::infrastructure::config::AxisSettings;
    use crate::infrastructure::memory_backend::InMemoryChartBackend;
    use crate::presentation::build_router;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request};
    use axum::Router;
    use serde_json::json;
    use tower::ServiceExt;

    fn app_state() -> Arc<AppState> {
        let backend = Arc::new(InMemoryChartBackend::new());
        let service = ChartService::new(
            backend.clone(),
            LabelFormatter::default(),
            AxisSettings::default(),
        );
        Arc::new(AppState::new(service, backend, Thresholds::new(4.0, 2.0, 8.0)))
    }

    fn router() -> Router {
        build_router(app_state())
    }

    async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = router
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health_check() {
        assert_eq!(health_check().await, "ok");
    }

    #[tokio::test]
    async fn test_chart_lifecycle_over_http() {
        let router = router();

        let (status, created) = send(
            &router,
            Method::POST,
            "/charts",
            Some(json!({
                "surface": "temperature-chart-1",
                "kind": "temperature_humidity",
                "batch": {
                    "timestamps": ["2024-03-01 10:00:00", "2024-03-01 10:05:00"],
                    "temperatures": [4.1, 4.3],
                    "humidities": [55.0, 56.0]
                }
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let handle = created["handle"].as_u64().unwrap();
        assert_eq!(created["state"]["thresholds"]["max"], 8.0);

        let (status, refreshed) = send(
            &router,
            Method::PUT,
            &format!("/charts/{handle}/data"),
            Some(json!({
                "timestamps": ["2024-03-01 10:10:00", "2024-03-01 10:15:00", "2024-03-01 10:20:00"],
                "primary": [4.0, 3.9, 3.8],
                "secondary": [54.0, 53.0, 52.0]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(refreshed["state"]["series"][2]["values"], json!([4.0, 4.0, 4.0]));

        let (status, document) = send(&router, Method::GET, &format!("/charts/{handle}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(document["data"]["labels"], json!(["10:10", "10:15", "10:20"]));

        let (status, _) = send(&router, Method::DELETE, &format!("/charts/{handle}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&router, Method::GET, &format!("/charts/{handle}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_failed_destroy_keeps_chart_registered() {
        let state = app_state();
        let router = build_router(state.clone());

        let (status, created) = send(
            &router,
            Method::POST,
            "/charts",
            Some(json!({
                "surface": "door-chart-4",
                "kind": "door_duration",
                "batch": { "timestamps": ["2024-03-01 10:00:00"], "durations": [12.0] }
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let handle = ChartHandle(created["handle"].as_u64().unwrap());

        state.backend.destroy(handle).unwrap();
        let (status, _) = send(&router, Method::DELETE, &format!("/charts/{handle}"), None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(state.charts.lock().await.contains_key(&handle));
    }

    #[tokio::test]
    async fn test_invalid_batch_is_unprocessable() {
        let router = router();
        let (status, body) = send(
            &router,
            Method::POST,
            "/charts",
            Some(json!({
                "surface": "door-chart-1",
                "kind": "door_duration",
                "batch": { "timestamps": ["2024-03-01 10:00:00"], "durations": [] }
            })),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid input"));
    }

    #[tokio::test]
    async fn test_fridge_view_over_http() {
        let router = router();
        let data = json!({
            "temperature": {
                "timestamps": ["2024-03-01T10:00:00"],
                "temperatures": [4.4],
                "humidities": [61.0]
            },
            "doors": {
                "timestamps": ["2024-03-01T10:00:30"],
                "durations": [42.0]
            }
        });

        let (status, handles) = send(&router, Method::POST, "/fridges/2/view", Some(data.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(handles["fridge_id"], 2);

        let (status, _) = send(&router, Method::POST, "/fridges/2/view", Some(data.clone())).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = send(&router, Method::PUT, "/fridges/2/view", Some(data)).await;
        assert_eq!(status, StatusCode::OK);

        let doors = handles["doors"].as_u64().unwrap();
        let (_, document) = send(&router, Method::GET, &format!("/charts/{doors}"), None).await;
        assert_eq!(document["options"]["plugins"]["tooltip"]["labels"], json!(["42 seconds"]));

        let (status, _) = send(&router, Method::DELETE, "/fridges/2/view", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&router, Method::PUT, "/fridges/2/view", Some(json!({
            "temperature": { "timestamps": [], "primary": [] },
            "doors": { "timestamps": [], "primary": [] }
        })))
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
