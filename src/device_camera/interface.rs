use image::RgbImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CameraError {
    #[error("camera capture is not supported on this platform: {0}")]
    Unsupported(String),
    #[error("camera unavailable: {0}")]
    Unavailable(String),
    #[error("camera has not been started")]
    NotStarted,
    #[error("camera has not produced a frame yet")]
    NoFrame,
    #[error("camera opened after shutdown")]
    ShutDown,
}

/// An opened, video-only device stream. Dropping it stops the device.
pub trait CameraStream: Send {
    /// Native resolution negotiated when the stream was opened.
    fn resolution(&self) -> Resolution;

    /// Most recent frame at native resolution, if one has arrived.
    fn latest_frame(&self) -> Option<RgbImage>;
}

pub trait DeviceCamera {
    /// Negotiates device access. Blocks until the device grants or refuses.
    fn open(&self) -> Result<Box<dyn CameraStream>, CameraError>;
}
