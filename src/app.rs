use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::Config;
use crate::engine::{DrillEngine, DrillEvent, DrillPhase, StandardSequencer};
use crate::session::input::InputBox;
use crate::session::queue;
use crate::session::result::{AttemptResult, SessionSummary};
use crate::store::json_store::JsonStore;
use crate::store::schema::{ProgressData, ProgressStats};
use crate::ui::theme::Theme;
use crate::vocab::Vocabulary;
use crate::vocab::source::WordCard;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Drill,
    Summary,
}

/// The word currently on screen together with its engine.
pub struct ActiveWord {
    pub card: WordCard,
    pub engine: DrillEngine,
    pub started_at: Instant,
}

pub struct App {
    pub screen: AppScreen,
    pub config: Config,
    pub theme: Theme,
    pub vocab: Vocabulary,
    pub progress: ProgressData,
    pub store: Option<JsonStore>,
    pub queue: Vec<WordCard>,
    pub queue_index: usize,
    pub active: Option<ActiveWord>,
    pub input: InputBox,
    pub summary: SessionSummary,
    pub stats: ProgressStats,
    /// Set on a rejected keystroke, cleared by the next accepted edit.
    pub error_flash: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config, store: Option<JsonStore>) -> Result<Self> {
        let vocab = Vocabulary::load(config.target_language)
            .with_context(|| format!("loading {} vocabulary", config.target_language.name()))?;

        let progress = match store.as_ref().map(JsonStore::load_progress) {
            Some(Some(data)) if !data.needs_reset() => data,
            Some(_) => {
                tracing::warn!("progress file unreadable or outdated, starting fresh");
                ProgressData::default()
            }
            None => ProgressData::default(),
        };

        let theme = Theme::load(&config.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %config.theme, "unknown theme, using default");
            Theme::default()
        });

        let mut app = Self {
            screen: AppScreen::Drill,
            input: InputBox::new(config.dead_keys),
            config,
            theme,
            vocab,
            progress,
            store,
            queue: Vec::new(),
            queue_index: 0,
            active: None,
            summary: SessionSummary::default(),
            stats: ProgressStats::default(),
            error_flash: false,
            should_quit: false,
        };
        app.start_session();
        Ok(app)
    }

    pub fn start_session(&mut self) {
        let queue = queue::build_session_queue(
            &self.vocab,
            &self.progress,
            &self.config.word_types,
            self.config.session_size,
        );
        self.start_with_queue(queue);
    }

    /// Start a session over an explicit word list.
    pub fn start_with_queue(&mut self, queue: Vec<WordCard>) {
        tracing::info!(
            language = %self.vocab.language,
            words = queue.len(),
            "session started"
        );
        self.queue = queue;
        self.queue_index = 0;
        self.summary = SessionSummary::default();
        self.screen = AppScreen::Drill;
        self.refresh_stats();
        self.load_word();
    }

    fn load_word(&mut self) {
        self.input.reset();
        self.error_flash = false;
        let Some(card) = self.queue.get(self.queue_index).cloned() else {
            self.active = None;
            self.finish_session();
            return;
        };
        let sequencer = StandardSequencer::new(card.language, self.config.full_conjugation);
        let engine = DrillEngine::new(Box::new(card.clone()), Box::new(sequencer));
        tracing::debug!(word = %card.id(), phase = %engine.phase(), "word loaded");
        self.active = Some(ActiveWord {
            card,
            engine,
            started_at: Instant::now(),
        });
    }

    fn finish_session(&mut self) {
        if self.screen == AppScreen::Summary {
            return;
        }
        tracing::info!(
            words = self.summary.words(),
            correct = self.summary.correct(),
            "session finished"
        );
        self.refresh_stats();
        self.screen = AppScreen::Summary;
    }

    pub fn refresh_stats(&mut self) {
        let language = self.vocab.language;
        let ids: Vec<String> = self.vocab.words.iter().map(|w| w.id(language)).collect();
        self.stats = self
            .progress
            .stats(ids.iter().map(String::as_str), Utc::now());
    }

    pub fn phase(&self) -> Option<DrillPhase> {
        self.active.as_ref().map(|a| a.engine.phase())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Only process Press events; Repeat would inflate input
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.screen {
            AppScreen::Drill => self.handle_drill_key(key),
            AppScreen::Summary => self.handle_summary_key(key),
        }
    }

    fn handle_drill_key(&mut self, key: KeyEvent) {
        let Some(phase) = self.phase() else {
            self.finish_session();
            return;
        };

        match key.code {
            KeyCode::Esc => {
                if !self.cancel_composition() {
                    self.finish_session();
                }
            }
            KeyCode::Enter if phase == DrillPhase::Complete => self.next_word(),
            KeyCode::Char(' ') if phase == DrillPhase::Complete => self.next_word(),
            KeyCode::Tab if phase.is_reveal() => self.with_engine(|engine, _| {
                engine.on_reveal();
            }),
            KeyCode::BackTab if phase.is_reveal() => self.with_engine(|engine, _| {
                engine.reveal_all();
            }),
            KeyCode::Backspace => self.with_engine(|engine, input| input.backspace(engine)),
            KeyCode::Char(ch) if phase.is_data_entry() => {
                self.with_engine(|engine, input| input.type_char(engine, ch))
            }
            _ => {}
        }
    }

    fn handle_summary_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Enter | KeyCode::Char('r') => self.start_session(),
            _ => {}
        }
    }

    pub fn handle_paste(&mut self, text: &str) {
        if self.screen != AppScreen::Drill || !self.phase().is_some_and(DrillPhase::is_data_entry) {
            return;
        }
        self.with_engine(|engine, input| input.paste(engine, text));
    }

    fn cancel_composition(&mut self) -> bool {
        let mut cancelled = false;
        self.with_engine(|engine, input| cancelled = input.cancel_composition(engine));
        cancelled
    }

    fn with_engine(&mut self, f: impl FnOnce(&mut DrillEngine, &mut InputBox)) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        f(&mut active.engine, &mut self.input);
        self.drain_events();
    }

    fn drain_events(&mut self) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        for event in active.engine.take_events() {
            match event {
                DrillEvent::Mismatch { .. } => self.error_flash = true,
                DrillEvent::ErrorCleared => self.error_flash = false,
                DrillEvent::PhaseChanged { .. } => self.error_flash = false,
                DrillEvent::CompositionRepaired { restored_prefix } => {
                    tracing::info!(prefix = %restored_prefix, "repaired composition input");
                }
                DrillEvent::WordComplete { mistakes } => {
                    tracing::debug!(word = %active.card.id(), mistakes, "word complete");
                }
            }
        }
    }

    /// Score the finished word and move on.
    fn next_word(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };
        let now = Utc::now();
        let attempt = AttemptResult::new(
            active.card.id(),
            active.engine.mistakes(),
            active.started_at.elapsed(),
            now,
        );
        let record = self
            .progress
            .record_attempt(&attempt.word_id, attempt.correct, now);
        tracing::info!(
            word = %attempt.word_id,
            correct = attempt.correct,
            mistakes = attempt.mistakes,
            interval = record.interval,
            "attempt recorded"
        );
        self.save_progress();
        self.summary.push(attempt);
        self.queue_index += 1;
        self.refresh_stats();
        self.load_word();
    }

    fn save_progress(&self) {
        if let Some(ref store) = self.store {
            if let Err(e) = store.save_progress(&self.progress) {
                tracing::error!(error = %e, "failed to save progress");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventState;
    use tempfile::TempDir;

    use super::*;
    use crate::vocab::Word;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.handle_key(press(KeyCode::Char(ch)));
        }
    }

    fn test_app(dir: &TempDir) -> App {
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        let mut app = App::new(Config::default(), Some(store)).unwrap();
        let haus = app.vocab.find("de:noun:Haus").cloned().unwrap();
        let language = app.vocab.language;
        app.start_with_queue(vec![WordCard::new(haus, language)]);
        app
    }

    fn haus_forms(app: &App) -> (String, String) {
        match &app.active.as_ref().unwrap().card.word {
            Word::Noun(n) => (n.singular.clone(), n.plural.clone()),
            Word::Verb(_) => unreachable!(),
        }
    }

    #[test]
    fn clean_word_is_scored_correct_and_saved() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        let (singular, plural) = haus_forms(&app);

        type_text(&mut app, &format!("das {singular}{plural}"));
        assert_eq!(app.phase(), Some(DrillPhase::Translation));
        app.handle_key(press(KeyCode::BackTab));
        assert_eq!(app.phase(), Some(DrillPhase::Complete));
        app.handle_key(press(KeyCode::Enter));

        assert_eq!(app.screen, AppScreen::Summary);
        assert_eq!(app.summary.correct(), 1);
        let stored = app.store.as_ref().unwrap().load_progress().unwrap();
        assert_eq!(stored.get("de:noun:Haus").unwrap().correct_count, 1);
    }

    #[test]
    fn mistake_marks_attempt_incorrect() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        let (singular, plural) = haus_forms(&app);

        type_text(&mut app, "dx");
        assert!(app.error_flash);
        app.handle_key(press(KeyCode::Backspace));
        assert!(!app.error_flash);
        type_text(&mut app, &format!("as {singular}{plural}"));
        for _ in 0..3 {
            app.handle_key(press(KeyCode::Tab));
        }
        app.handle_key(press(KeyCode::Char(' ')));

        assert_eq!(app.summary.correct(), 0);
        assert_eq!(app.summary.mistakes(), 1);
        assert_eq!(app.progress.get("de:noun:Haus").unwrap().incorrect_count, 1);
    }

    #[test]
    fn tab_does_nothing_during_data_entry() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        app.handle_key(press(KeyCode::Tab));
        assert_eq!(app.phase(), Some(DrillPhase::Article));
    }

    #[test]
    fn escape_cancels_dead_key_before_leaving() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        type_text(&mut app, "\"");
        app.handle_key(press(KeyCode::Esc));
        assert_eq!(app.screen, AppScreen::Drill);
        app.handle_key(press(KeyCode::Esc));
        assert_eq!(app.screen, AppScreen::Summary);
        app.handle_key(press(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn ctrl_c_quits_anywhere() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        app.handle_key(KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        });
        assert!(app.should_quit);
    }
}
