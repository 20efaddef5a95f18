//! Helpers to convert prediction state into display strings.

use crate::egui_app::state::{OperationStatus, PredictionFormState};
use crate::predictor::PredictionResult;

/// Display strings for a received verdict.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultView {
    pub usable: bool,
    pub verdict: &'static str,
    pub probability: String,
}

pub fn verdict_label(usable: bool) -> &'static str {
    if usable { "Suitable" } else { "Not suitable" }
}

/// Format a `0..=1` probability as a percentage with one decimal.
///
/// Halves round away from zero (`0.5625` is `"56.3%"`). A probability of
/// exactly zero is a real value and renders as `"0.0%"`; only a missing or
/// non-finite probability shows `"N/A"`.
pub fn probability_label(probability: Option<f64>) -> String {
    match probability.filter(|value| value.is_finite()) {
        Some(value) => format!("{:.1}%", (value * 1000.0).round() / 10.0),
        None => "N/A".to_string(),
    }
}

pub fn result_view(result: &PredictionResult) -> ResultView {
    ResultView {
        usable: result.usable,
        verdict: verdict_label(result.usable),
        probability: probability_label(result.probability),
    }
}

pub fn submit_label(status: OperationStatus) -> &'static str {
    match status {
        OperationStatus::Loading => "Predicting...",
        _ => "Run prediction",
    }
}

/// Error text to render, only while the form is in the error state.
pub fn visible_error(form: &PredictionFormState) -> Option<&str> {
    match form.status {
        OperationStatus::Error => form.error.as_deref(),
        _ => None,
    }
}

/// Result panel contents, only while the form holds a verdict.
pub fn visible_result(form: &PredictionFormState) -> Option<ResultView> {
    form.result.as_ref().map(result_view)
}
