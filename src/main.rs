use config::Config;
use device_camera::impl_fake::DeviceCameraFake;
use device_camera::impl_nokhwa::DeviceCameraNokhwa;
use device_camera::interface::{DeviceCamera, Resolution};
use eframe::egui;
use file_picker::impl_rfd::FilePickerRfd;
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use prediction_client::impl_http::PredictionClientHttp;
use privio::main::Privio;
use std::sync::Arc;

mod capture_surface;
mod config;
mod device_camera;
mod file_picker;
mod library;
mod media;
mod prediction_client;
mod privio;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::from_env();

    let logger: Arc<dyn Logger + Send + Sync> = Arc::new(LoggerConsole::new(config.logger_timezone));

    logger.info(&format!("Uploading to {}", config.upload_url))?;

    let device_camera: Arc<dyn DeviceCamera + Send + Sync> = if config.fake_camera {
        Arc::new(DeviceCameraFake::new(logger.clone(), Resolution::new(640, 480)))
    } else {
        Arc::new(DeviceCameraNokhwa::new(config.camera_index, logger.clone()))
    };

    let file_picker = Arc::new(FilePickerRfd::new(logger.clone()));

    let prediction_client = Arc::new(PredictionClientHttp::new(&config, logger.clone())?);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.window_title.clone())
            .with_inner_size([720.0, 820.0]),
        ..Default::default()
    };

    let window_title = config.window_title.clone();

    eframe::run_native(
        &window_title,
        options,
        Box::new(move |_cc| {
            Box::new(Privio::new(
                config,
                logger,
                device_camera,
                file_picker,
                prediction_client,
            ))
        }),
    )
    .map_err(|e| format!("Failed to run window: {}", e))?;

    Ok(())
}
