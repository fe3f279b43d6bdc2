// Domain layer - chart state, sample batches and display formatting
pub mod chart;
pub mod format;
pub mod sample;
