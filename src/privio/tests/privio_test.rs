use crate::device_camera::impl_fake::FakeCameraAccess;
use crate::library::logger::interface::LogLevel;
use crate::media::SelectedMedia;
use crate::prediction_client::interface::{Prediction, UploadError};
use crate::privio::core::{CameraState, Msg, NotificationKind, UploadState};
use crate::privio::render::ResultSummary;
use crate::privio::tests::fixture::{Fixture, CAMERA_RESOLUTION};
use serde_json::json;
use std::time::{Duration, Instant};

fn start_camera(f: &mut Fixture) {
    f.privio.dispatch(Msg::StartCameraClicked);
    assert!(f.wait_for(|model| model.camera.is_active()));
}

fn capture(f: &mut Fixture) {
    f.privio.dispatch(Msg::CaptureClicked);
    assert!(f.wait_for(|model| model.capture.is_some()));
}

fn upload(f: &mut Fixture) {
    f.privio.dispatch(Msg::UploadClicked);
    assert_eq!(f.privio.model().upload, UploadState::InFlight);
    assert!(f.wait_for(|model| model.upload == UploadState::Idle));
}

#[test]
fn test_denied_camera_keeps_prediction() {
    let mut f = Fixture::with_camera_access(FakeCameraAccess::Denied);
    f.file_picker.push(Ok(Some(SelectedMedia::new(
        "junction.png",
        "image/png",
        vec![1, 2, 3],
    ))));
    f.privio.dispatch(Msg::ChooseFileClicked);
    assert!(f.wait_for(|model| model.selected_file.is_some()));
    upload(&mut f);
    let prediction = f.privio.model().prediction.clone();
    assert!(prediction.is_some());

    f.privio.dispatch(Msg::StartCameraClicked);
    assert!(f.wait_for(|model| model.camera != CameraState::Starting));

    let model = f.privio.model();
    assert_eq!(model.camera, CameraState::Inactive);
    assert_eq!(model.prediction, prediction);
    assert_eq!(
        model.notification.as_ref().map(|n| n.kind),
        Some(NotificationKind::Camera)
    );
    assert_eq!(f.device_camera.active_count(), 0);
}

#[test]
fn test_capture_matches_video_resolution() {
    let mut f = Fixture::new();

    start_camera(&mut f);
    capture(&mut f);

    let model = f.privio.model();
    assert_eq!(
        model.camera,
        CameraState::Active {
            resolution: CAMERA_RESOLUTION
        }
    );
    assert_eq!(
        model.capture.as_ref().map(|c| c.resolution()),
        Some(CAMERA_RESOLUTION)
    );
}

#[test]
fn test_selected_file_is_uploaded_over_capture() {
    let mut f = Fixture::new();
    f.file_picker.push(Ok(Some(SelectedMedia::new(
        "junction.mp4",
        "video/mp4",
        vec![0, 0, 0, 24],
    ))));

    f.privio.dispatch(Msg::ChooseFileClicked);
    assert!(f.wait_for(|model| model.selected_file.is_some()));
    start_camera(&mut f);
    capture(&mut f);
    upload(&mut f);

    let payloads = f.prediction_client.payloads();
    assert_eq!(payloads.len(), 1);
    assert_eq!(payloads[0].field_name, "file");
    assert_eq!(payloads[0].file_name, "junction.mp4");
    assert_eq!(payloads[0].mime, "video/mp4");
    assert_eq!(payloads[0].bytes, vec![0, 0, 0, 24]);
}

#[test]
fn test_capture_is_uploaded_as_jpeg() {
    let mut f = Fixture::new();

    start_camera(&mut f);
    capture(&mut f);
    upload(&mut f);

    let payloads = f.prediction_client.payloads();
    assert_eq!(payloads.len(), 1);
    assert_eq!(payloads[0].file_name, f.config.capture_file_name);
    assert_eq!(payloads[0].file_name, "captured.jpg");
    assert_eq!(payloads[0].mime, "image/jpeg");

    let decoded = image::load_from_memory(&payloads[0].bytes).unwrap();
    assert_eq!(
        (decoded.width(), decoded.height()),
        (CAMERA_RESOLUTION.width, CAMERA_RESOLUTION.height)
    );
}

#[test]
fn test_successful_response_is_rendered() {
    let mut f = Fixture::new();

    start_camera(&mut f);
    capture(&mut f);
    upload(&mut f);

    let summary = ResultSummary::from_model(f.privio.model()).unwrap();
    assert_eq!(summary.prediction_line(), "Prediction: violation");
    assert_eq!(summary.email_status_line(), "Email Status: sent");
}

#[test]
fn test_network_failure_notifies_once() {
    let mut f = Fixture::new();
    start_camera(&mut f);
    capture(&mut f);
    upload(&mut f);
    let prediction = f.privio.model().prediction.clone();

    f.prediction_client.set_reply(Err(UploadError::Network(
        "connection refused".to_string(),
    )));
    upload(&mut f);

    let model = f.privio.model();
    assert_eq!(model.prediction, prediction);
    assert_eq!(
        model.notification.as_ref().map(|n| n.kind),
        Some(NotificationKind::Upload)
    );

    let upload_errors = f
        .logger
        .records_at(LogLevel::Error)
        .into_iter()
        .filter(|record| record.message.starts_with("Error uploading file"))
        .count();
    assert_eq!(upload_errors, 1);

    f.privio.dispatch(Msg::NotificationDismissed);
    f.privio.pump();
    assert!(f.privio.model().notification.is_none());
}

#[test]
fn test_restart_holds_one_stream() {
    let mut f = Fixture::new();

    start_camera(&mut f);
    assert_eq!(f.device_camera.active_count(), 1);

    f.privio.dispatch(Msg::StopCameraClicked);
    let deadline = Instant::now() + Duration::from_secs(5);
    while f.device_camera.active_count() > 0 && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(5));
    }
    assert_eq!(f.device_camera.active_count(), 0);

    start_camera(&mut f);

    assert_eq!(f.device_camera.active_count(), 1);
    assert_eq!(f.device_camera.opened_count(), 2);
}

#[test]
fn test_teardown_releases_camera() {
    let mut f = Fixture::new();
    start_camera(&mut f);
    assert_eq!(f.device_camera.active_count(), 1);

    f.privio.teardown();

    assert!(f.privio.model().torn_down);
    assert!(!f.privio.run_effect().has_camera_session());
    assert_eq!(f.device_camera.active_count(), 0);

    f.privio.dispatch(Msg::UploadDone(Ok(Prediction::new(json!({"message": "late"})))));
    assert_eq!(f.privio.model().prediction, None);
}
