use crate::engine::DrillEngine;
use crate::session::compose::{DeadKeyComposer, KeyOutcome};

/// The on-screen input box. Every edit is reported to the engine and the box
/// then shows whatever the engine accepted.
#[derive(Clone, Debug, Default)]
pub struct InputBox {
    text: String,
    composer: DeadKeyComposer,
}

impl InputBox {
    pub fn new(dead_keys: bool) -> Self {
        Self {
            text: String::new(),
            composer: DeadKeyComposer::new(dead_keys),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_composing(&self) -> bool {
        self.composer.is_composing()
    }

    pub fn pending_dead_key(&self) -> Option<char> {
        self.composer.pending()
    }

    pub fn type_char(&mut self, engine: &mut DrillEngine, ch: char) {
        match self.composer.feed(ch) {
            KeyOutcome::Insert(c) => {
                self.text.push(c);
                engine.on_input(&self.text);
            }
            KeyOutcome::Begin(dead) => {
                engine.on_composition_start();
                self.sync(engine);
                self.text.push(dead);
                engine.on_input(&self.text);
            }
            KeyOutcome::End(committed) => {
                // Replace the provisional glyph with the committed text.
                self.text.pop();
                self.text.push_str(&committed);
                engine.on_composition_end(&committed, &self.text);
            }
        }
        self.sync(engine);
    }

    /// Pasted text arrives as a single edit; a pending dead key is dropped.
    pub fn paste(&mut self, engine: &mut DrillEngine, text: &str) {
        if self.composer.cancel() {
            engine.on_composition_cancel();
            self.sync(engine);
        }
        self.text.push_str(text);
        engine.on_input(&self.text);
        self.sync(engine);
    }

    pub fn backspace(&mut self, engine: &mut DrillEngine) {
        if self.composer.cancel() {
            engine.on_composition_cancel();
        } else if !engine.on_backspace_key() {
            self.text.pop();
            engine.on_input(&self.text);
        }
        self.sync(engine);
    }

    /// Abandon a pending dead key. Returns whether one was pending.
    pub fn cancel_composition(&mut self, engine: &mut DrillEngine) -> bool {
        if self.composer.cancel() {
            engine.on_composition_cancel();
            self.sync(engine);
            true
        } else {
            false
        }
    }

    /// Start fresh for the next word.
    pub fn reset(&mut self) {
        self.text.clear();
        self.composer.cancel();
    }

    fn sync(&mut self, engine: &DrillEngine) {
        self.text.clear();
        self.text.push_str(engine.box_value());
    }
}
