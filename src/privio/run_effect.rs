use crate::config::Config;
use crate::device_camera::interface::{CameraError, CameraStream, DeviceCamera, Resolution};
use crate::file_picker::interface::FilePicker;
use crate::library::logger::interface::Logger;
use crate::media::UploadSource;
use crate::prediction_client::interface::{Prediction, PredictionClient, UploadError};
use crate::privio::core::{Effect, Msg};
use image::RgbImage;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;

/// Performs effects and reports the outcome as a `Msg`.
///
/// Clones share one camera session slot, so at most one stream is ever held.
#[derive(Clone)]
pub struct RunEffect {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    device_camera: Arc<dyn DeviceCamera + Send + Sync>,
    file_picker: Arc<dyn FilePicker + Send + Sync>,
    prediction_client: Arc<dyn PredictionClient + Send + Sync>,
    camera_session: Arc<Mutex<Option<Box<dyn CameraStream>>>>,
    shut_down: Arc<AtomicBool>,
}

impl RunEffect {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        device_camera: Arc<dyn DeviceCamera + Send + Sync>,
        file_picker: Arc<dyn FilePicker + Send + Sync>,
        prediction_client: Arc<dyn PredictionClient + Send + Sync>,
    ) -> Self {
        Self {
            config,
            logger: logger.with_namespace("effect"),
            device_camera,
            file_picker,
            prediction_client,
            camera_session: Arc::new(Mutex::new(None)),
            shut_down: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn run_effect(&self, effect: Effect, msg_sender: Sender<Msg>) {
        let _ = self
            .logger
            .info(&format!("Running effect: {}", effect.to_display_string()));

        let msg = match effect {
            Effect::PickFile => {
                let picked = self.file_picker.pick();
                if let Err(e) = &picked {
                    let _ = self.logger.error(&format!("Error reading file: {}", e));
                }
                Some(Msg::FilePicked(picked))
            }
            Effect::StartCamera => {
                let started = self.start_camera();
                if let Err(e) = &started {
                    let _ = self.logger.error(&format!("Error accessing camera: {}", e));
                }
                Some(Msg::CameraStartDone(started))
            }
            Effect::StopCamera => {
                self.release_camera();
                None
            }
            Effect::CaptureFrame => {
                let captured = self.capture_frame();
                if let Err(e) = &captured {
                    let _ = self.logger.error(&format!("Error capturing photo: {}", e));
                }
                Some(Msg::FrameCaptured(captured))
            }
            Effect::Upload { source } => {
                let uploaded = self.upload(source);
                if let Err(e) = &uploaded {
                    let _ = self.logger.error(&format!("Error uploading file: {}", e));
                }
                Some(Msg::UploadDone(uploaded))
            }
        };

        if let Some(msg) = msg {
            // The receiver is gone once the app has been torn down.
            let _ = msg_sender.send(msg);
        }
    }

    pub fn latest_frame(&self) -> Option<RgbImage> {
        self.camera_session
            .lock()
            .as_ref()
            .and_then(|stream| stream.latest_frame())
    }

    #[allow(dead_code)]
    pub fn has_camera_session(&self) -> bool {
        self.camera_session.lock().is_some()
    }

    pub fn release_camera(&self) {
        let released = self.camera_session.lock().take();
        if released.is_some() {
            drop(released);
            let _ = self.logger.info("Camera session released");
        }
    }

    /// Releases the camera and refuses to hold any stream opened afterwards.
    pub fn shutdown(&self) {
        self.shut_down.store(true, Ordering::SeqCst);
        self.release_camera();
    }

    fn start_camera(&self) -> Result<Resolution, CameraError> {
        self.release_camera();

        let stream = self.device_camera.open()?;
        let resolution = stream.resolution();

        let mut session = self.camera_session.lock();
        if self.shut_down.load(Ordering::SeqCst) {
            drop(stream);
            return Err(CameraError::ShutDown);
        }
        *session = Some(stream);

        Ok(resolution)
    }

    fn capture_frame(&self) -> Result<RgbImage, CameraError> {
        let session = self.camera_session.lock();
        let stream = session.as_ref().ok_or(CameraError::NotStarted)?;
        stream.latest_frame().ok_or(CameraError::NoFrame)
    }

    fn upload(&self, source: UploadSource) -> Result<Prediction, UploadError> {
        let payload = source.into_payload(&self.config)?;
        self.prediction_client.upload(payload)
    }
}
