// Error type shared by the chart core, the backends and the HTTP layer

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChartError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown chart handle: {0}")]
    UnknownHandle(u64),

    #[error("Rendering surface unavailable: {0}")]
    SurfaceUnavailable(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl ChartError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

pub type ChartResult<T> = Result<T, ChartError>;
