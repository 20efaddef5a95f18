//! Desktop client for a material suitability prediction service.
/// Application directory resolution.
pub mod app_dirs;
/// Persisted settings.
pub mod config;
/// egui front end.
pub mod egui_app;
/// Shared HTTP agent helpers.
pub mod http_client;
/// Global tracing setup.
pub mod logging;
/// Material property form model.
pub mod material;
/// Prediction service client.
pub mod predictor;
