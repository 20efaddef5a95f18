use crate::material::MaterialProperties;
use crate::predictor::{HealthStatus, PredictionError, PredictionResult, PredictorClient};
use std::{
    sync::mpsc::{Receiver, Sender},
    thread,
};

type TryRecvError = std::sync::mpsc::TryRecvError;

pub(crate) enum JobMessage {
    Predicted(PredictionJobResult),
    HealthChecked(HealthCheckResult),
}

#[derive(Debug)]
pub(crate) struct PredictionJob {
    pub(crate) request_id: u64,
    pub(crate) client: PredictorClient,
    pub(crate) properties: MaterialProperties,
}

#[derive(Debug)]
pub(crate) struct PredictionJobResult {
    pub(crate) request_id: u64,
    pub(crate) result: Result<PredictionResult, PredictionError>,
}

#[derive(Debug)]
pub(crate) struct HealthCheckResult {
    pub(crate) result: Result<HealthStatus, PredictionError>,
}

/// Worker threads and the channel they report back on.
pub(crate) struct ControllerJobs {
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
    pub(super) health_check_in_progress: bool,
}

impl ControllerJobs {
    pub(super) fn new() -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel::<JobMessage>();
        Self {
            message_tx,
            message_rx,
            health_check_in_progress: false,
        }
    }

    pub(super) fn try_recv_message(&self) -> Result<JobMessage, TryRecvError> {
        self.message_rx.try_recv()
    }

    #[cfg(test)]
    pub(super) fn message_sender(&self) -> Sender<JobMessage> {
        self.message_tx.clone()
    }

    /// Run one prediction request off the UI thread.
    ///
    /// Every call spawns a worker; callers discard replies they no longer
    /// expect by comparing `request_id`.
    pub(super) fn begin_prediction(&mut self, job: PredictionJob) {
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = job.client.predict(&job.properties);
            let _ = tx.send(JobMessage::Predicted(PredictionJobResult {
                request_id: job.request_id,
                result,
            }));
        });
    }

    pub(super) fn begin_health_check(&mut self, client: PredictorClient) {
        if self.health_check_in_progress {
            return;
        }
        self.health_check_in_progress = true;
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = client.check_health();
            let _ = tx.send(JobMessage::HealthChecked(HealthCheckResult { result }));
        });
    }

    pub(super) fn clear_health_check(&mut self) {
        self.health_check_in_progress = false;
    }
}
