use crate::capture_surface::CaptureSurface;
use crate::device_camera::interface::{CameraError, Resolution};
use crate::file_picker::interface::FilePickError;
use crate::media::{SelectedMedia, UploadSource};
use crate::prediction_client::interface::{Prediction, UploadError};
use image::RgbImage;

pub const CAMERA_UNSUPPORTED_MESSAGE: &str = "Camera not supported on this device.";
pub const CAMERA_ERROR_MESSAGE: &str = "Error accessing camera.";
pub const CAPTURE_ERROR_MESSAGE: &str = "Error capturing photo.";
pub const FILE_ERROR_MESSAGE: &str = "Error reading file.";
pub const UPLOAD_ERROR_MESSAGE: &str = "Error uploading file.";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CameraState {
    #[default]
    Inactive,
    Starting,
    Active {
        resolution: Resolution,
    },
}

impl CameraState {
    pub fn is_active(&self) -> bool {
        matches!(self, CameraState::Active { .. })
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum UploadState {
    #[default]
    Idle,
    InFlight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Camera,
    Capture,
    File,
    Upload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl NotificationKind {
    pub fn title(&self) -> &'static str {
        match self {
            NotificationKind::Camera => "Camera",
            NotificationKind::Capture => "Capture",
            NotificationKind::File => "File",
            NotificationKind::Upload => "Upload",
        }
    }
}

impl Notification {
    fn new(kind: NotificationKind, message: &str) -> Self {
        Self {
            kind,
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Model {
    pub selected_file: Option<SelectedMedia>,
    pub prediction: Option<Prediction>,
    pub camera: CameraState,
    pub capture: Option<CaptureSurface>,
    pub upload: UploadState,
    pub notification: Option<Notification>,
    pub torn_down: bool,
}

impl Model {
    pub fn upload_source(&self) -> Option<UploadSource> {
        UploadSource::choose(self.selected_file.as_ref(), self.capture.as_ref())
    }

    pub fn can_upload(&self) -> bool {
        self.upload == UploadState::Idle && self.upload_source().is_some()
    }
}

#[derive(Debug)]
pub enum Msg {
    ChooseFileClicked,
    FilePicked(Result<Option<SelectedMedia>, FilePickError>),
    ClearSelectionClicked,
    StartCameraClicked,
    CameraStartDone(Result<Resolution, CameraError>),
    StopCameraClicked,
    CaptureClicked,
    FrameCaptured(Result<RgbImage, CameraError>),
    UploadClicked,
    UploadDone(Result<Prediction, UploadError>),
    NotificationDismissed,
    Teardown,
}

impl Msg {
    pub fn to_display_string(&self) -> String {
        match self {
            Msg::FilePicked(Ok(Some(media))) => {
                format!("FilePicked({}, {} bytes)", media.name, media.len())
            }
            Msg::FrameCaptured(Ok(frame)) => {
                format!("FrameCaptured({}x{})", frame.width(), frame.height())
            }
            msg => format!("{:?}", msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    PickFile,
    StartCamera,
    StopCamera,
    CaptureFrame,
    Upload { source: UploadSource },
}

impl Effect {
    pub fn to_display_string(&self) -> String {
        match self {
            Effect::Upload { source } => format!("Upload({})", source.to_display_string()),
            effect => format!("{:?}", effect),
        }
    }
}

pub fn init() -> (Model, Vec<Effect>) {
    (Model::default(), vec![])
}

pub fn transition(model: Model, msg: Msg) -> (Model, Vec<Effect>) {
    if model.torn_down {
        return (model, vec![]);
    }

    match msg {
        Msg::ChooseFileClicked => (model, vec![Effect::PickFile]),

        Msg::FilePicked(Ok(Some(media))) => (
            Model {
                selected_file: Some(media),
                ..model
            },
            vec![],
        ),
        Msg::FilePicked(Ok(None)) => (model, vec![]),
        Msg::FilePicked(Err(_)) => (
            Model {
                notification: Some(Notification::new(
                    NotificationKind::File,
                    FILE_ERROR_MESSAGE,
                )),
                ..model
            },
            vec![],
        ),

        Msg::ClearSelectionClicked => (
            Model {
                selected_file: None,
                ..model
            },
            vec![],
        ),

        Msg::StartCameraClicked => match model.camera {
            CameraState::Inactive => (
                Model {
                    camera: CameraState::Starting,
                    ..model
                },
                vec![Effect::StartCamera],
            ),
            CameraState::Starting | CameraState::Active { .. } => (model, vec![]),
        },

        Msg::CameraStartDone(Ok(resolution)) => match model.camera {
            CameraState::Starting => (
                Model {
                    camera: CameraState::Active { resolution },
                    ..model
                },
                vec![],
            ),
            CameraState::Active { .. } => (model, vec![]),
            // Stopped while the device was still negotiating.
            CameraState::Inactive => (model, vec![Effect::StopCamera]),
        },
        Msg::CameraStartDone(Err(error)) => {
            let message = match error {
                CameraError::Unsupported(_) => CAMERA_UNSUPPORTED_MESSAGE,
                _ => CAMERA_ERROR_MESSAGE,
            };
            let camera = match model.camera {
                CameraState::Starting => CameraState::Inactive,
                camera => camera,
            };
            (
                Model {
                    camera,
                    notification: Some(Notification::new(NotificationKind::Camera, message)),
                    ..model
                },
                vec![],
            )
        }

        Msg::StopCameraClicked => match model.camera {
            CameraState::Inactive => (model, vec![]),
            CameraState::Starting | CameraState::Active { .. } => (
                Model {
                    camera: CameraState::Inactive,
                    ..model
                },
                vec![Effect::StopCamera],
            ),
        },

        Msg::CaptureClicked => {
            if model.camera.is_active() {
                (model, vec![Effect::CaptureFrame])
            } else {
                (model, vec![])
            }
        }

        Msg::FrameCaptured(Ok(frame)) => (
            Model {
                capture: Some(CaptureSurface::draw(frame)),
                ..model
            },
            vec![],
        ),
        Msg::FrameCaptured(Err(_)) => (
            Model {
                notification: Some(Notification::new(
                    NotificationKind::Capture,
                    CAPTURE_ERROR_MESSAGE,
                )),
                ..model
            },
            vec![],
        ),

        Msg::UploadClicked => {
            if model.upload == UploadState::InFlight {
                return (model, vec![]);
            }
            match model.upload_source() {
                Some(source) => (
                    Model {
                        upload: UploadState::InFlight,
                        ..model
                    },
                    vec![Effect::Upload { source }],
                ),
                None => (model, vec![]),
            }
        }

        Msg::UploadDone(Ok(prediction)) => (
            Model {
                prediction: Some(prediction),
                upload: UploadState::Idle,
                ..model
            },
            vec![],
        ),
        Msg::UploadDone(Err(_)) => (
            Model {
                upload: UploadState::Idle,
                notification: Some(Notification::new(
                    NotificationKind::Upload,
                    UPLOAD_ERROR_MESSAGE,
                )),
                ..model
            },
            vec![],
        ),

        Msg::NotificationDismissed => (
            Model {
                notification: None,
                ..model
            },
            vec![],
        ),

        // The session may still be opening even when the model says inactive.
        Msg::Teardown => (
            Model {
                camera: CameraState::Inactive,
                torn_down: true,
                ..model
            },
            vec![Effect::StopCamera],
        ),
    }
}
