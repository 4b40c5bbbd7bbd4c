use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

pub type TransitionFn<TModel, TMsg, TEffect> =
    Arc<dyn Fn(TModel, TMsg) -> (TModel, Vec<TEffect>) + Send + Sync>;

pub type RunEffectFn<TMsg, TEffect> = Arc<dyn Fn(TEffect, Sender<TMsg>) + Send + Sync>;

/// Holds the current model and feeds messages through `transition`.
///
/// Effects run on their own threads and report back through the message
/// channel; `pump` drains whatever arrived since the last call.
pub struct StateMachine<TModel, TMsg, TEffect> {
    model: TModel,
    transition_fn: TransitionFn<TModel, TMsg, TEffect>,
    run_effect_fn: RunEffectFn<TMsg, TEffect>,
    msg_sender: Sender<TMsg>,
    msg_receiver: Receiver<TMsg>,
}

impl<TModel, TMsg, TEffect> StateMachine<TModel, TMsg, TEffect>
where
    TModel: Clone,
    TMsg: Send + 'static,
    TEffect: Send + 'static,
{
    pub fn new(
        init: (TModel, Vec<TEffect>),
        transition_fn: TransitionFn<TModel, TMsg, TEffect>,
        run_effect_fn: RunEffectFn<TMsg, TEffect>,
    ) -> Self {
        let (msg_sender, msg_receiver) = channel();
        let (model, effects) = init;

        let machine = Self {
            model,
            transition_fn,
            run_effect_fn,
            msg_sender,
            msg_receiver,
        };

        machine.spawn_effects(effects);

        machine
    }

    pub fn model(&self) -> &TModel {
        &self.model
    }

    pub fn dispatch(&mut self, msg: TMsg) {
        let effects = self.apply(msg);
        self.spawn_effects(effects);
    }

    /// Runs the resulting effects on the calling thread. Used where the effect
    /// must finish before returning, e.g. releasing devices on teardown.
    pub fn dispatch_blocking(&mut self, msg: TMsg) {
        let effects = self.apply(msg);
        for effect in effects {
            (self.run_effect_fn)(effect, self.msg_sender.clone());
        }
    }

    /// Applies every message currently queued. Returns how many were applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(msg) = self.msg_receiver.try_recv() {
            self.dispatch(msg);
            applied += 1;
        }
        applied
    }

    fn apply(&mut self, msg: TMsg) -> Vec<TEffect> {
        let (new_model, effects) = (self.transition_fn)(self.model.clone(), msg);
        self.model = new_model;
        effects
    }

    fn spawn_effects(&self, effects: Vec<TEffect>) {
        for effect in effects {
            let effect_sender = self.msg_sender.clone();
            let run_effect_fn = Arc::clone(&self.run_effect_fn);
            std::thread::spawn(move || {
                run_effect_fn(effect, effect_sender);
            });
        }
    }
}
