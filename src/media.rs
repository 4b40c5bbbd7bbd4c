use crate::capture_surface::CaptureSurface;
use crate::config::Config;
use crate::prediction_client::interface::UploadError;
use std::path::Path;
use std::sync::Arc;

/// Extension to mime type for everything the file picker offers.
pub const MEDIA_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("webp", "image/webp"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("mp4", "video/mp4"),
    ("m4v", "video/x-m4v"),
    ("mov", "video/quicktime"),
    ("avi", "video/x-msvideo"),
    ("mkv", "video/x-matroska"),
    ("webm", "video/webm"),
];

pub fn media_extensions() -> Vec<&'static str> {
    MEDIA_TYPES.iter().map(|(ext, _)| *ext).collect()
}

pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_lowercase();
    MEDIA_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| *mime)
}

/// A user-chosen image or video, held fully in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedMedia {
    pub name: String,
    pub mime: String,
    pub bytes: Arc<[u8]>,
}

impl SelectedMedia {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UploadSource {
    File(SelectedMedia),
    Capture(CaptureSurface),
}

impl UploadSource {
    /// The selected file wins over a captured frame. `None` when neither exists.
    pub fn choose(
        selected_file: Option<&SelectedMedia>,
        capture: Option<&CaptureSurface>,
    ) -> Option<Self> {
        match (selected_file, capture) {
            (Some(file), _) => Some(UploadSource::File(file.clone())),
            (None, Some(capture)) => Some(UploadSource::Capture(capture.clone())),
            (None, None) => None,
        }
    }

    /// Builds the single multipart part. Captures are JPEG-encoded here.
    pub fn into_payload(self, config: &Config) -> Result<UploadPayload, UploadError> {
        match self {
            UploadSource::File(file) => Ok(UploadPayload {
                field_name: config.upload_field_name.clone(),
                file_name: file.name,
                mime: file.mime,
                bytes: file.bytes.to_vec(),
            }),
            UploadSource::Capture(capture) => {
                let bytes = capture
                    .encode_jpeg(config.jpeg_quality)
                    .map_err(|e| UploadError::Encode(e.to_string()))?;
                Ok(UploadPayload {
                    field_name: config.upload_field_name.clone(),
                    file_name: config.capture_file_name.clone(),
                    mime: "image/jpeg".to_string(),
                    bytes,
                })
            }
        }
    }

    pub fn to_display_string(&self) -> String {
        match self {
            UploadSource::File(file) => format!("File({}, {} bytes)", file.name, file.len()),
            UploadSource::Capture(capture) => format!("Capture({})", capture.resolution()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadPayload {
    pub field_name: String,
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}
