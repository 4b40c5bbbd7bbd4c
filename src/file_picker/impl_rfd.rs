use crate::file_picker::interface::{read_media, FilePickError, FilePicker};
use crate::library::logger::interface::Logger;
use crate::media::{media_extensions, SelectedMedia};
use std::sync::Arc;

pub struct FilePickerRfd {
    logger: Arc<dyn Logger + Send + Sync>,
}

impl FilePickerRfd {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("file_picker").with_namespace("rfd"),
        }
    }
}

impl FilePicker for FilePickerRfd {
    fn pick(&self) -> Result<Option<SelectedMedia>, FilePickError> {
        let Some(path) = rfd::FileDialog::new()
            .set_title("Choose an image or video")
            .add_filter("Images and videos", &media_extensions())
            .pick_file()
        else {
            let _ = self.logger.info("File selection cancelled");
            return Ok(None);
        };

        let media = read_media(&path)?;
        let _ = self.logger.info(&format!(
            "Selected {} ({}, {} bytes)",
            media.name,
            media.mime,
            media.len()
        ));

        Ok(Some(media))
    }
}
