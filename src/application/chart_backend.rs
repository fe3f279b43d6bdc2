// Backend trait for the charting library that draws chart states
use crate::domain::chart::RenderableChartState;
use crate::error::ChartResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a widget constructed by a [`ChartBackend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChartHandle(pub u64);

impl fmt::Display for ChartHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub trait ChartBackend: Send + Sync {
    /// Create a widget on `surface` showing `state`.
    fn construct(&self, surface: &str, state: &RenderableChartState) -> ChartResult<ChartHandle>;

    /// Replace what the widget shows with `state` and draw it again.
    fn redraw(&self, handle: ChartHandle, state: &RenderableChartState) -> ChartResult<()>;

    /// Tear the widget down.
    fn destroy(&self, handle: ChartHandle) -> ChartResult<()>;
}
