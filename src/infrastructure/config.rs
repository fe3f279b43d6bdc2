use crate::domain::chart::Thresholds;
use crate::domain::format::{LabelFormatter, DEFAULT_TIME_FORMAT};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub server: ServerSettings,
    pub labels: LabelSettings,
    pub thresholds: ThresholdDefaults,
    pub axes: AxisSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LabelSettings {
    pub time_format: String,
    pub utc_offset_minutes: i32,
}

/// Fridge defaults used when a temperature chart arrives without thresholds.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct ThresholdDefaults {
    pub target: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct AxisSettings {
    /// Headroom added around the min/max thresholds on the temperature axis.
    pub padding: f64,
    pub humidity_min: f64,
    pub humidity_max: f64,
}

impl Default for AxisSettings {
    fn default() -> Self {
        Self {
            padding: 2.0,
            humidity_min: 0.0,
            humidity_max: 100.0,
        }
    }
}

impl ServerSettings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl LabelSettings {
    pub fn formatter(&self) -> anyhow::Result<LabelFormatter> {
        Ok(LabelFormatter::new(&self.time_format, self.utc_offset_minutes)?)
    }
}

impl From<ThresholdDefaults> for Thresholds {
    fn from(defaults: ThresholdDefaults) -> Self {
        Thresholds::new(defaults.target, defaults.min, defaults.max)
    }
}

fn builder_with_defaults() -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
    let axes = AxisSettings::default();
    Ok(config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080)?
        .set_default("labels.time_format", DEFAULT_TIME_FORMAT)?
        .set_default("labels.utc_offset_minutes", 0)?
        .set_default("thresholds.target", 4.0)?
        .set_default("thresholds.min", 2.0)?
        .set_default("thresholds.max", 8.0)?
        .set_default("axes.padding", axes.padding)?
        .set_default("axes.humidity_min", axes.humidity_min)?
        .set_default("axes.humidity_max", axes.humidity_max)?)
}

/// Defaults, then `config/dashboard.{toml,...}` if present, then `FRIDGE__*` env vars.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = builder_with_defaults()?
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(config::Environment::with_prefix("FRIDGE").separator("__"))
        .build()?;

    finish(settings)
}

/// Same layering as [`load_dashboard_config`] but from an in-memory TOML document.
pub fn dashboard_config_from_toml(toml: &str) -> anyhow::Result<DashboardConfig> {
    let settings = builder_with_defaults()?
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    finish(settings)
}

fn finish(settings: config::Config) -> anyhow::Result<DashboardConfig> {
    let config: DashboardConfig = settings.try_deserialize()?;
    // Fail at startup rather than on the first chart.
    config.labels.formatter()?;
    Ok(config)
}
