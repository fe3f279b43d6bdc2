// Infrastructure layer - configuration and chart backends
pub mod chartjs_mapper;
pub mod config;
pub mod memory_backend;
