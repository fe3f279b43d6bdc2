// Application layer - binding, refreshing and hosting charts
pub mod chart_backend;
pub mod chart_service;
pub mod fridge_view;
pub mod series_binder;
pub mod series_refresher;
