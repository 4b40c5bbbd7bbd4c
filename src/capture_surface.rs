use crate::device_camera::interface::Resolution;
use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use std::sync::Arc;

/// Offscreen raster holding exactly one drawn video frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureSurface {
    image: Arc<RgbImage>,
}

impl CaptureSurface {
    /// Draws `frame` onto a surface sized to the frame's native resolution.
    pub fn draw(frame: RgbImage) -> Self {
        Self {
            image: Arc::new(frame),
        }
    }

    pub fn resolution(&self) -> Resolution {
        Resolution::new(self.image.width(), self.image.height())
    }

    pub fn encode_jpeg(&self, quality: u8) -> Result<Vec<u8>, image::ImageError> {
        let mut bytes = Vec::new();
        JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100))
            .encode_image(self.image.as_ref())?;
        Ok(bytes)
    }
}
