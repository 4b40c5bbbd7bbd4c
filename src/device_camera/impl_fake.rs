use crate::device_camera::interface::{CameraError, CameraStream, DeviceCamera, Resolution};
use crate::library::logger::interface::Logger;
use image::{Rgb, RgbImage};
use rand::Rng;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeCameraAccess {
    Granted,
    Denied,
    Unsupported,
}

/// Synthetic camera producing noise frames. Counts opened and live streams.
pub struct DeviceCameraFake {
    logger: Arc<dyn Logger + Send + Sync>,
    resolution: Resolution,
    access: FakeCameraAccess,
    opened: Arc<AtomicUsize>,
    active: Arc<AtomicUsize>,
}

impl DeviceCameraFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>, resolution: Resolution) -> Self {
        Self {
            logger: logger.with_namespace("camera").with_namespace("fake"),
            resolution,
            access: FakeCameraAccess::Granted,
            opened: Arc::new(AtomicUsize::new(0)),
            active: Arc::new(AtomicUsize::new(0)),
        }
    }

    #[allow(dead_code)]
    pub fn with_access(mut self, access: FakeCameraAccess) -> Self {
        self.access = access;
        self
    }

    #[allow(dead_code)]
    pub fn opened_count(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    #[allow(dead_code)]
    pub fn active_count(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }
}

impl DeviceCamera for DeviceCameraFake {
    fn open(&self) -> Result<Box<dyn CameraStream>, CameraError> {
        match self.access {
            FakeCameraAccess::Denied => {
                let _ = self.logger.warn("Camera access denied");
                return Err(CameraError::Unavailable("permission denied".to_string()));
            }
            FakeCameraAccess::Unsupported => {
                return Err(CameraError::Unsupported("no camera backend".to_string()));
            }
            FakeCameraAccess::Granted => {}
        }

        self.opened.fetch_add(1, Ordering::SeqCst);
        self.active.fetch_add(1, Ordering::SeqCst);
        let _ = self
            .logger
            .info(&format!("Camera opened at {}", self.resolution));

        Ok(Box::new(CameraStreamFake {
            logger: self.logger.clone(),
            resolution: self.resolution,
            active: self.active.clone(),
        }))
    }
}

struct CameraStreamFake {
    logger: Arc<dyn Logger + Send + Sync>,
    resolution: Resolution,
    active: Arc<AtomicUsize>,
}

impl CameraStream for CameraStreamFake {
    fn resolution(&self) -> Resolution {
        self.resolution
    }

    fn latest_frame(&self) -> Option<RgbImage> {
        let mut rng = rand::rng();
        Some(RgbImage::from_fn(
            self.resolution.width,
            self.resolution.height,
            |_, _| Rgb([rng.random(), rng.random(), rng.random()]),
        ))
    }
}

impl Drop for CameraStreamFake {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
        let _ = self.logger.info("Camera released");
    }
}
