use crate::media::UploadPayload;
use serde::Deserialize;
use serde_json::Value;

/// Whatever JSON the classification service returned. Only `message` and
/// `value` are ever read, and neither is required.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Prediction(Value);

impl Prediction {
    #[allow(dead_code)]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn message(&self) -> String {
        self.field("message")
    }

    pub fn value(&self) -> String {
        self.field("value")
    }

    pub fn raw(&self) -> &Value {
        &self.0
    }

    fn field(&self, name: &str) -> String {
        match self.0.get(name) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    #[error("failed to encode captured frame: {0}")]
    Encode(String),
    #[error("failed to build upload request: {0}")]
    Request(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("malformed response body: {0}")]
    MalformedBody(String),
}

pub trait PredictionClient {
    /// Sends one multipart form and parses the JSON reply. No retries.
    fn upload(&self, payload: UploadPayload) -> Result<Prediction, UploadError>;
}
