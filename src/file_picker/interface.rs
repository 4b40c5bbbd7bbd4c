use crate::media::{mime_for_path, SelectedMedia};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilePickError {
    #[error("{path} is not an image or video")]
    UnsupportedType { path: PathBuf },
    #[error("failed to read {path}: {reason}")]
    Read { path: PathBuf, reason: String },
}

pub trait FilePicker {
    /// Asks the user for one image or video. `Ok(None)` when the user cancels.
    fn pick(&self) -> Result<Option<SelectedMedia>, FilePickError>;
}

/// Reads a chosen file into memory, rejecting anything that is not image or video.
pub fn read_media(path: &Path) -> Result<SelectedMedia, FilePickError> {
    let mime = mime_for_path(path).ok_or_else(|| FilePickError::UnsupportedType {
        path: path.to_path_buf(),
    })?;

    let bytes = std::fs::read(path).map_err(|e| FilePickError::Read {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());

    Ok(SelectedMedia::new(name, mime, bytes))
}
