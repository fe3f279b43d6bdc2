// Mapper to convert chart states to Chart.js configuration documents
use crate::domain::chart::{AxisSide, AxisSpec, ChartKind, RenderableChartState, Series, SeriesKey};
use crate::domain::format::{format_duration_compact, whole_seconds};
use serde_json::{json, Map, Value};

const REFERENCE_DASH: [u32; 2] = [5, 5];

struct Palette {
    border: &'static str,
    background: Option<&'static str>,
}

fn palette(key: SeriesKey) -> Palette {
    match key {
        SeriesKey::Temperature => Palette {
            border: "rgba(255, 99, 132, 1)",
            background: Some("rgba(255, 99, 132, 0.2)"),
        },
        SeriesKey::Humidity => Palette {
            border: "rgba(54, 162, 235, 1)",
            background: Some("rgba(54, 162, 235, 0.2)"),
        },
        SeriesKey::Target => Palette {
            border: "rgba(75, 192, 192, 1)",
            background: None,
        },
        SeriesKey::Min => Palette {
            border: "rgba(54, 162, 235, 0.5)",
            background: None,
        },
        SeriesKey::Max => Palette {
            border: "rgba(255, 99, 132, 0.5)",
            background: None,
        },
        SeriesKey::DoorDuration => Palette {
            border: "rgba(255, 193, 7, 1)",
            background: Some("rgba(255, 193, 7, 0.5)"),
        },
    }
}

pub fn state_to_chartjs(state: &RenderableChartState) -> Value {
    let chart_type = match state.kind {
        ChartKind::TemperatureHumidity => "line",
        ChartKind::DoorDuration => "bar",
    };

    let datasets: Vec<Value> = state
        .series
        .iter()
        .map(|s| dataset_to_chartjs(state.kind, s))
        .collect();

    json!({
        "type": chart_type,
        "data": {
            "labels": state.labels,
            "datasets": datasets,
        },
        "options": options_to_chartjs(state),
    })
}

fn dataset_to_chartjs(kind: ChartKind, series: &Series) -> Value {
    let colors = palette(series.key);
    let mut dataset = json!({
        "label": series.label(),
        "data": series.values,
        "borderColor": colors.border,
    });

    if let Some(background) = colors.background {
        dataset["backgroundColor"] = json!(background);
    }

    match kind {
        ChartKind::TemperatureHumidity => {
            dataset["fill"] = json!(false);
            dataset["yAxisID"] = json!(axis_id(series.key.axis()));
            if series.is_reference() {
                dataset["borderWidth"] = json!(1);
                dataset["borderDash"] = json!(REFERENCE_DASH);
                dataset["pointRadius"] = json!(0);
            } else {
                dataset["borderWidth"] = json!(2);
                dataset["pointRadius"] = json!(1);
                dataset["pointHoverRadius"] = json!(5);
                dataset["tension"] = json!(0.1);
            }
        }
        ChartKind::DoorDuration => {
            dataset["borderWidth"] = json!(1);
        }
    }

    dataset
}

fn options_to_chartjs(state: &RenderableChartState) -> Value {
    let mut tooltip = json!({ "titles": state.tooltip_titles });
    if state.kind == ChartKind::DoorDuration {
        let labels: Vec<String> = state
            .primary()
            .values
            .iter()
            .map(|v| format_duration_compact(whole_seconds(*v)))
            .collect();
        tooltip["labels"] = json!(labels);
    }

    let hidden: Vec<&str> = state.reference_series().map(|s| s.label()).collect();

    let mut scales = Map::new();
    scales.insert(
        "x".to_string(),
        json!({
            "title": { "display": true, "text": "Time" },
            "ticks": { "maxRotation": 45, "minRotation": 45 },
        }),
    );
    scales.insert(
        axis_id(AxisSide::Left).to_string(),
        axis_to_chartjs(&state.axes.left, AxisSide::Left, state.kind),
    );
    if let Some(right) = &state.axes.right {
        scales.insert(
            axis_id(AxisSide::Right).to_string(),
            axis_to_chartjs(right, AxisSide::Right, state.kind),
        );
    }

    let mut options = json!({
        "responsive": true,
        "maintainAspectRatio": false,
        "plugins": {
            "title": { "display": false },
            "tooltip": tooltip,
            "legend": {
                "position": "top",
                "labels": { "usePointStyle": true },
                "hiddenLabels": hidden,
            },
        },
        "scales": Value::Object(scales),
    });

    if state.kind == ChartKind::TemperatureHumidity {
        options["interaction"] = json!({ "mode": "index", "intersect": false });
        options["stacked"] = json!(false);
    }

    options
}

fn axis_to_chartjs(axis: &AxisSpec, side: AxisSide, kind: ChartKind) -> Value {
    let mut value = json!({
        "title": { "display": true, "text": axis.title },
    });

    if kind == ChartKind::TemperatureHumidity {
        value["type"] = json!("linear");
        value["display"] = json!(true);
        let position = match side {
            AxisSide::Left => "left",
            AxisSide::Right => "right",
        };
        value["position"] = json!(position);
        value["grid"] = json!({ "drawOnChartArea": false });
    }

    let bounds = [
        ("suggestedMin", axis.suggested_min),
        ("suggestedMax", axis.suggested_max),
        ("min", axis.min),
        ("max", axis.max),
    ];
    for (name, bound) in bounds {
        if let Some(bound) = bound {
            value[name] = json!(bound);
        }
    }
    if axis.begin_at_zero {
        value["beginAtZero"] = json!(true);
    }

    value
}

fn axis_id(side: AxisSide) -> &'static str {
    match side {
        AxisSide::Left => "y",
        AxisSide::Right => "y1",
    }
}
