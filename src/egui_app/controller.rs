//! Controller that owns the UI state and drives prediction requests.

mod jobs;

use crate::egui_app::state::{OperationStatus, ServerHealthState, StatusBarState, UiState};
use crate::egui_app::ui::style::StatusTone;
use crate::material::{FormInputs, MaterialField};
use crate::predictor::{HealthStatus, PredictionError, PredictorClient};
use jobs::{ControllerJobs, HealthCheckResult, JobMessage, PredictionJob, PredictionJobResult};

/// Owns [`UiState`] and applies user actions and background results to it.
pub struct EguiController {
    pub ui: UiState,
    client: PredictorClient,
    jobs: ControllerJobs,
    next_request_id: u64,
    pending_request: Option<u64>,
}

impl EguiController {
    /// Create a controller whose form starts from `inputs`.
    pub fn new(client: PredictorClient, inputs: FormInputs) -> Self {
        Self {
            ui: UiState::new(inputs),
            client,
            jobs: ControllerJobs::new(),
            next_request_id: 1,
            pending_request: None,
        }
    }

    /// Base URL of the prediction service.
    pub fn api_base(&self) -> &str {
        self.client.base_url()
    }

    /// Overwrite one form field.
    pub fn set_field(&mut self, field: MaterialField, value: impl Into<String>) {
        self.ui.form.inputs.set_field(field, value);
    }

    /// Submit the current form. Ignored while a request is already loading.
    pub fn submit(&mut self) {
        if self.ui.form.is_loading() {
            tracing::debug!("Ignoring submit while a prediction is in flight");
            return;
        }
        self.ui.form.error = None;
        self.ui.form.result = None;

        let properties = match self.ui.form.inputs.to_properties() {
            Ok(properties) => properties,
            Err(err) => {
                tracing::info!("Rejected form input: {err}");
                self.fail_submission(PredictionError::from(err));
                return;
            }
        };

        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.pending_request = Some(request_id);
        self.ui.form.status = OperationStatus::Loading;
        self.set_status(
            format!("Requesting prediction from {}", self.client.base_url()),
            StatusTone::Busy,
        );
        self.jobs.begin_prediction(PredictionJob {
            request_id,
            client: self.client.clone(),
            properties,
        });
    }

    /// Restore default inputs and clear any result or error.
    ///
    /// A request still in flight is detached; its reply is dropped on arrival.
    pub fn reset(&mut self) {
        if let Some(request_id) = self.pending_request.take() {
            tracing::debug!(request_id, "Detaching in-flight prediction on reset");
        }
        self.ui.form.inputs.reset();
        self.ui.form.status = OperationStatus::Idle;
        self.ui.form.error = None;
        self.ui.form.result = None;
        self.ui.status = StatusBarState::idle();
    }

    /// Probe the service's health endpoint in the background.
    pub fn check_server(&mut self) {
        if self.jobs.health_check_in_progress {
            return;
        }
        self.ui.server = ServerHealthState::Checking;
        self.jobs.begin_health_check(self.client.clone());
    }

    /// Apply finished background work. Returns true when state changed.
    pub fn poll_background_jobs(&mut self) -> bool {
        let mut changed = false;
        while let Ok(message) = self.jobs.try_recv_message() {
            changed = true;
            match message {
                JobMessage::Predicted(message) => self.handle_prediction(message),
                JobMessage::HealthChecked(message) => self.handle_health_check(message),
            }
        }
        changed
    }

    /// True while any background request is outstanding.
    pub fn is_busy(&self) -> bool {
        self.ui.form.is_loading() || self.jobs.health_check_in_progress
    }

    fn handle_prediction(&mut self, message: PredictionJobResult) {
        if self.pending_request != Some(message.request_id) {
            tracing::debug!(
                request_id = message.request_id,
                "Discarding stale prediction reply"
            );
            return;
        }
        self.pending_request = None;
        match message.result {
            Ok(result) => {
                let verdict = crate::egui_app::view_model::result_view(&result);
                self.set_status(
                    format!("Prediction: {} ({})", verdict.verdict, verdict.probability),
                    StatusTone::Info,
                );
                self.ui.form.result = Some(result);
                self.ui.form.error = None;
                self.ui.form.status = OperationStatus::Success;
            }
            Err(err) => self.fail_submission(err),
        }
    }

    fn fail_submission(&mut self, err: PredictionError) {
        let message = err.user_message();
        self.set_status(format!("Prediction failed: {message}"), StatusTone::Error);
        self.ui.form.result = None;
        self.ui.form.error = Some(message);
        self.ui.form.status = OperationStatus::Error;
    }

    fn handle_health_check(&mut self, message: HealthCheckResult) {
        self.jobs.clear_health_check();
        self.ui.server = match message.result {
            Ok(HealthStatus::Ok) => ServerHealthState::Online,
            Ok(HealthStatus::Degraded(reason)) => {
                tracing::warn!("Prediction service degraded: {reason}");
                ServerHealthState::Degraded(reason)
            }
            Err(err) => {
                tracing::warn!("Prediction service unreachable: {err}");
                ServerHealthState::Offline(err.user_message())
            }
        };
    }

    fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.ui.status = StatusBarState::with_tone(text, tone);
    }
}
