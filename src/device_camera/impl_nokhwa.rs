use crate::device_camera::interface::{CameraError, CameraStream, DeviceCamera, Resolution};
use crate::library::logger::interface::Logger;
use image::RgbImage;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{ApiBackend, CameraIndex, RequestedFormat, RequestedFormatType};
use nokhwa::Camera;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

/// Camera backed by nokhwa. The device handle stays on a dedicated capture
/// thread; the stream handle only sees decoded frames.
pub struct DeviceCameraNokhwa {
    camera_index: u32,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DeviceCameraNokhwa {
    pub fn new(camera_index: u32, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            camera_index,
            logger: logger.with_namespace("camera").with_namespace("nokhwa"),
        }
    }

    fn open_device(camera_index: u32) -> Result<Camera, CameraError> {
        let devices = nokhwa::query(ApiBackend::Auto)
            .map_err(|e| CameraError::Unsupported(e.to_string()))?;
        if devices.is_empty() {
            return Err(CameraError::Unavailable("no camera found".to_string()));
        }

        let requested =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestResolution);
        let mut camera = Camera::new(CameraIndex::Index(camera_index), requested)
            .map_err(|e| CameraError::Unavailable(e.to_string()))?;

        camera
            .open_stream()
            .map_err(|e| CameraError::Unavailable(e.to_string()))?;

        Ok(camera)
    }

    fn capture_loop(
        mut camera: Camera,
        latest: Arc<Mutex<Option<RgbImage>>>,
        running: Arc<AtomicBool>,
        logger: Arc<dyn Logger + Send + Sync>,
    ) {
        while running.load(Ordering::Acquire) {
            let buffer = match camera.frame() {
                Ok(buffer) => buffer,
                Err(e) => {
                    let _ = logger.warn(&format!("Failed to read frame: {}", e));
                    std::thread::sleep(Duration::from_millis(10));
                    continue;
                }
            };

            let resolution = buffer.resolution();
            let decoded = match buffer.decode_image::<RgbFormat>() {
                Ok(decoded) => decoded,
                Err(e) => {
                    let _ = logger.warn(&format!("Failed to decode frame: {}", e));
                    continue;
                }
            };

            // nokhwa pins its own `image` version, so rebuild from raw bytes.
            if let Some(frame) =
                RgbImage::from_raw(resolution.width(), resolution.height(), decoded.into_raw())
            {
                *latest.lock() = Some(frame);
            }
        }

        if let Err(e) = camera.stop_stream() {
            let _ = logger.warn(&format!("Failed to stop camera stream: {}", e));
        }
        let _ = logger.info("Camera released");
    }
}

impl DeviceCamera for DeviceCameraNokhwa {
    fn open(&self) -> Result<Box<dyn CameraStream>, CameraError> {
        let _ = self
            .logger
            .info(&format!("Opening camera {}", self.camera_index));

        let latest = Arc::new(Mutex::new(None));
        let running = Arc::new(AtomicBool::new(true));
        let (ready_tx, ready_rx) = mpsc::channel();

        let camera_index = self.camera_index;
        let thread_latest = latest.clone();
        let thread_running = running.clone();
        let logger = self.logger.clone();

        let handle = std::thread::Builder::new()
            .name("camera-capture".to_string())
            .spawn(move || {
                let camera = match Self::open_device(camera_index) {
                    Ok(camera) => camera,
                    Err(e) => {
                        let _ = ready_tx.send(Err(e));
                        return;
                    }
                };

                let resolution = camera.resolution();
                let _ = ready_tx.send(Ok(Resolution::new(
                    resolution.width(),
                    resolution.height(),
                )));

                Self::capture_loop(camera, thread_latest, thread_running, logger);
            })
            .map_err(|e| CameraError::Unavailable(e.to_string()))?;

        let resolution = match ready_rx.recv() {
            Ok(Ok(resolution)) => resolution,
            Ok(Err(e)) => {
                let _ = handle.join();
                return Err(e);
            }
            Err(_) => {
                let _ = handle.join();
                return Err(CameraError::Unavailable(
                    "capture thread exited before opening".to_string(),
                ));
            }
        };

        let _ = self.logger.info(&format!("Camera opened at {}", resolution));

        Ok(Box::new(CameraStreamNokhwa {
            resolution,
            latest,
            running,
            handle: Some(handle),
        }))
    }
}

struct CameraStreamNokhwa {
    resolution: Resolution,
    latest: Arc<Mutex<Option<RgbImage>>>,
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl CameraStream for CameraStreamNokhwa {
    fn resolution(&self) -> Resolution {
        self.resolution
    }

    fn latest_frame(&self) -> Option<RgbImage> {
        self.latest.lock().clone()
    }
}

impl Drop for CameraStreamNokhwa {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
