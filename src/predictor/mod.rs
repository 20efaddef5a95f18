//! Client for the external material suitability prediction service.

pub mod api;

pub use api::{HealthStatus, PredictionError, PredictionResult, PredictorClient};
