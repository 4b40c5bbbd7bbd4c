use crate::config::Config;
use crate::library::logger::interface::Logger;
use crate::media::UploadPayload;
use crate::prediction_client::interface::{Prediction, PredictionClient, UploadError};
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use std::sync::Arc;

pub struct PredictionClientHttp {
    client: Client,
    upload_url: String,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl PredictionClientHttp {
    pub fn new(config: &Config, logger: Arc<dyn Logger + Send + Sync>) -> Result<Self, UploadError> {
        // reqwest's blocking client defaults to 30s; `None` disables the timeout.
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| UploadError::Request(e.to_string()))?;

        Ok(Self {
            client,
            upload_url: config.upload_url.clone(),
            logger: logger.with_namespace("prediction_client").with_namespace("http"),
        })
    }
}

impl PredictionClient for PredictionClientHttp {
    fn upload(&self, payload: UploadPayload) -> Result<Prediction, UploadError> {
        let _ = self.logger.info(&format!(
            "POST {} ({}, {}, {} bytes)",
            self.upload_url,
            payload.file_name,
            payload.mime,
            payload.bytes.len()
        ));

        let part = Part::bytes(payload.bytes)
            .file_name(payload.file_name)
            .mime_str(&payload.mime)
            .map_err(|e| UploadError::Request(e.to_string()))?;
        let form = Form::new().part(payload.field_name, part);

        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .map_err(|e| UploadError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UploadError::Status(status.as_u16()));
        }

        let prediction = response
            .json::<Prediction>()
            .map_err(|e| UploadError::MalformedBody(e.to_string()))?;

        let _ = self.logger.info(&format!("Received {}", prediction.raw()));

        Ok(prediction)
    }
}
