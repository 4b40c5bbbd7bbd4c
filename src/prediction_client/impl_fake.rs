use crate::media::UploadPayload;
use crate::prediction_client::interface::{Prediction, PredictionClient, UploadError};
use parking_lot::Mutex;

/// Returns a fixed reply and remembers every payload it was given.
pub struct PredictionClientFake {
    reply: Mutex<Result<Prediction, UploadError>>,
    payloads: Mutex<Vec<UploadPayload>>,
}

impl PredictionClientFake {
    pub fn new(reply: Result<Prediction, UploadError>) -> Self {
        Self {
            reply: Mutex::new(reply),
            payloads: Mutex::new(Vec::new()),
        }
    }

    pub fn set_reply(&self, reply: Result<Prediction, UploadError>) {
        *self.reply.lock() = reply;
    }

    pub fn payloads(&self) -> Vec<UploadPayload> {
        self.payloads.lock().clone()
    }
}

impl PredictionClient for PredictionClientFake {
    fn upload(&self, payload: UploadPayload) -> Result<Prediction, UploadError> {
        self.payloads.lock().push(payload);
        self.reply.lock().clone()
    }
}
