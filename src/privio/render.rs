use crate::config::Config;
use crate::privio::core::{CameraState, Model, Msg, UploadState};
use eframe::egui;

const PREVIEW_MAX_WIDTH: f32 = 480.0;

/// The two lines shown under "Result:".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSummary {
    pub prediction: String,
    pub email_status: String,
}

impl ResultSummary {
    pub fn from_model(model: &Model) -> Option<Self> {
        model.prediction.as_ref().map(|prediction| Self {
            prediction: prediction.message(),
            email_status: prediction.value(),
        })
    }

    pub fn prediction_line(&self) -> String {
        format!("Prediction: {}", self.prediction)
    }

    pub fn email_status_line(&self) -> String {
        format!("Email Status: {}", self.email_status)
    }
}

pub fn selection_label(model: &Model) -> String {
    match &model.selected_file {
        Some(file) => format!("{} ({})", file.name, file.mime),
        None => "No file chosen".to_string(),
    }
}

/// Draws the model and returns the messages produced by this frame's clicks.
pub fn render(
    ctx: &egui::Context,
    config: &Config,
    model: &Model,
    preview: Option<&egui::TextureHandle>,
) -> Vec<Msg> {
    let mut msgs = Vec::new();
    let blocked = model.notification.is_some();

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.add_enabled_ui(!blocked, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading(egui::RichText::new(&config.title).size(32.0).strong());
                    ui.label(egui::RichText::new(&config.subtitle).size(18.0));
                });

                ui.add_space(16.0);
                render_camera(ui, model, preview, &mut msgs);

                ui.add_space(12.0);
                render_upload(ui, model, &mut msgs);

                if let Some(summary) = ResultSummary::from_model(model) {
                    ui.add_space(12.0);
                    ui.group(|ui| {
                        ui.heading("Result:");
                        ui.label(summary.prediction_line());
                        ui.label(summary.email_status_line());
                    });
                }
            });
        });
    });

    if let Some(notification) = &model.notification {
        egui::Window::new(notification.kind.title())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(notification.message.as_str());
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    msgs.push(Msg::NotificationDismissed);
                }
            });
    }

    msgs
}

fn render_camera(
    ui: &mut egui::Ui,
    model: &Model,
    preview: Option<&egui::TextureHandle>,
    msgs: &mut Vec<Msg>,
) {
    ui.group(|ui| {
        ui.set_width(ui.available_width());

        match model.camera {
            CameraState::Inactive => {
                if ui.button("Start Camera").clicked() {
                    msgs.push(Msg::StartCameraClicked);
                }
            }
            CameraState::Starting => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Starting camera...");
                });
            }
            CameraState::Active { resolution } => {
                if let Some(texture) = preview {
                    let size = texture.size_vec2();
                    let scale = (PREVIEW_MAX_WIDTH / size.x).min(1.0);
                    ui.image((texture.id(), size * scale));
                } else {
                    ui.label(format!("Waiting for video ({})", resolution));
                }

                ui.horizontal(|ui| {
                    if ui.button("Capture Photo").clicked() {
                        msgs.push(Msg::CaptureClicked);
                    }
                    if ui.button("Stop Camera").clicked() {
                        msgs.push(Msg::StopCameraClicked);
                    }
                });
            }
        }

        if let Some(capture) = &model.capture {
            ui.label(format!("Captured photo ({})", capture.resolution()));
        }
    });
}

fn render_upload(ui: &mut egui::Ui, model: &Model, msgs: &mut Vec<Msg>) {
    ui.group(|ui| {
        ui.set_width(ui.available_width());

        ui.horizontal(|ui| {
            if ui.button("Choose File...").clicked() {
                msgs.push(Msg::ChooseFileClicked);
            }
            ui.label(selection_label(model));
            if model.selected_file.is_some() && ui.small_button("Clear").clicked() {
                msgs.push(Msg::ClearSelectionClicked);
            }
        });

        let label = match model.upload {
            UploadState::Idle => "Upload File",
            UploadState::InFlight => "Uploading...",
        };
        if ui
            .add_enabled(model.can_upload(), egui::Button::new(label))
            .clicked()
        {
            msgs.push(Msg::UploadClicked);
        }
    });
}
