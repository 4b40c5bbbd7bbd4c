use crate::config::Config;
use crate::device_camera::interface::DeviceCamera;
use crate::file_picker::interface::FilePicker;
use crate::library::logger::interface::Logger;
use crate::library::state_machine::StateMachine;
use crate::prediction_client::interface::PredictionClient;
use crate::privio::core::{init, transition, Effect, Model, Msg};
use crate::privio::render::render;
use crate::privio::run_effect::RunEffect;
use eframe::egui;
use std::sync::mpsc::Sender;
use std::sync::Arc;

pub struct Privio {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    machine: StateMachine<Model, Msg, Effect>,
    run_effect: RunEffect,
    preview: Option<egui::TextureHandle>,
}

impl Privio {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        device_camera: Arc<dyn DeviceCamera + Send + Sync>,
        file_picker: Arc<dyn FilePicker + Send + Sync>,
        prediction_client: Arc<dyn PredictionClient + Send + Sync>,
    ) -> Self {
        let logger = logger.with_namespace("privio");
        let run_effect = RunEffect::new(
            config.clone(),
            logger.clone(),
            device_camera,
            file_picker,
            prediction_client,
        );

        let transition_logger = logger.clone();
        let effect_runner = run_effect.clone();

        let machine = StateMachine::new(
            init(),
            Arc::new(move |model: Model, msg: Msg| {
                let _ = transition_logger.info(&format!("msg: {}", msg.to_display_string()));
                let (model, effects) = transition(model, msg);
                if !effects.is_empty() {
                    let effects: Vec<String> =
                        effects.iter().map(Effect::to_display_string).collect();
                    let _ = transition_logger.info(&format!("effects: {:?}", effects));
                }
                (model, effects)
            }),
            Arc::new(move |effect: Effect, msg_sender: Sender<Msg>| {
                effect_runner.run_effect(effect, msg_sender)
            }),
        );

        Self {
            config,
            logger,
            machine,
            run_effect,
            preview: None,
        }
    }

    pub fn model(&self) -> &Model {
        self.machine.model()
    }

    #[allow(dead_code)]
    pub fn run_effect(&self) -> &RunEffect {
        &self.run_effect
    }

    pub fn dispatch(&mut self, msg: Msg) {
        self.machine.dispatch(msg);
    }

    /// Applies replies from finished effects.
    pub fn pump(&mut self) -> usize {
        self.machine.pump()
    }

    /// Releases the camera on the calling thread; every later message is ignored.
    pub fn teardown(&mut self) {
        if self.machine.model().torn_down {
            return;
        }
        let _ = self.logger.info("Tearing down");
        self.machine.dispatch_blocking(Msg::Teardown);
        self.run_effect.shutdown();
        self.preview = None;
    }

    fn refresh_preview(&mut self, ctx: &egui::Context) {
        if !self.machine.model().camera.is_active() {
            self.preview = None;
            return;
        }

        let Some(frame) = self.run_effect.latest_frame() else {
            return;
        };

        let image = egui::ColorImage::from_rgb(
            [frame.width() as usize, frame.height() as usize],
            frame.as_raw(),
        );

        match &mut self.preview {
            Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
            None => {
                self.preview =
                    Some(ctx.load_texture("camera-preview", image, egui::TextureOptions::LINEAR));
            }
        }
    }
}

impl eframe::App for Privio {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.pump();
        self.refresh_preview(ctx);

        let msgs = render(ctx, &self.config, self.machine.model(), self.preview.as_ref());
        for msg in msgs {
            self.dispatch(msg);
        }

        // Effects reply from worker threads, so keep polling.
        ctx.request_repaint_after(self.config.preview_rate);
    }
}

impl Drop for Privio {
    fn drop(&mut self) {
        self.teardown();
    }
}
