//! Shared state types for the egui UI.

use crate::egui_app::ui::style::{self, StatusTone};
use crate::material::FormInputs;
use crate::predictor::PredictionResult;
use egui::Color32;

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug)]
pub struct UiState {
    pub form: PredictionFormState,
    pub server: ServerHealthState,
    pub status: StatusBarState,
}

impl UiState {
    pub fn new(inputs: FormInputs) -> Self {
        Self {
            form: PredictionFormState::new(inputs),
            server: ServerHealthState::Unknown,
            status: StatusBarState::idle(),
        }
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(FormInputs::default())
    }
}

/// Lifecycle of the current prediction request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OperationStatus {
    /// Nothing submitted since launch or the last reset.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The last request returned a verdict.
    Success,
    /// The last request failed; see [`PredictionFormState::error`].
    Error,
}

/// Form inputs plus the outcome of the last submission.
#[derive(Clone, Debug, PartialEq)]
pub struct PredictionFormState {
    pub inputs: FormInputs,
    pub status: OperationStatus,
    /// Message shown while `status` is [`OperationStatus::Error`].
    pub error: Option<String>,
    /// Verdict shown while `status` is [`OperationStatus::Success`].
    pub result: Option<PredictionResult>,
}

impl PredictionFormState {
    pub fn new(inputs: FormInputs) -> Self {
        Self {
            inputs,
            status: OperationStatus::Idle,
            error: None,
            result: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == OperationStatus::Loading
    }
}

/// Last known reachability of the prediction service.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ServerHealthState {
    #[default]
    Unknown,
    Checking,
    Online,
    /// Reachable but not reporting ok.
    Degraded(String),
    Offline(String),
}

/// Status badge + text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    pub text: String,
    pub badge_label: String,
    pub badge_color: Color32,
}

impl StatusBarState {
    pub fn idle() -> Self {
        Self::with_tone("Enter material properties and run a prediction", StatusTone::Idle)
    }

    pub fn with_tone(text: impl Into<String>, tone: StatusTone) -> Self {
        Self {
            text: text.into(),
            badge_label: tone.label().into(),
            badge_color: style::status_badge_color(tone),
        }
    }
}
