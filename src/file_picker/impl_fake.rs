use crate::file_picker::interface::{FilePickError, FilePicker};
use crate::media::SelectedMedia;
use parking_lot::Mutex;
use std::collections::VecDeque;

/// Hands out queued picks in order; an empty queue behaves like a cancelled dialog.
#[derive(Default)]
pub struct FilePickerFake {
    picks: Mutex<VecDeque<Result<Option<SelectedMedia>, FilePickError>>>,
}

impl FilePickerFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, pick: Result<Option<SelectedMedia>, FilePickError>) {
        self.picks.lock().push_back(pick);
    }
}

impl FilePicker for FilePickerFake {
    fn pick(&self) -> Result<Option<SelectedMedia>, FilePickError> {
        self.picks.lock().pop_front().unwrap_or(Ok(None))
    }
}
