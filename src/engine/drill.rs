use serde::{Deserialize, Serialize};

use crate::engine::normalize::{nfc, nfc_owned};
use crate::engine::phase::{DrillPhase, PhaseSequencer};
use crate::engine::validator::{self, Verdict};
use crate::vocab::{Language, WordType};

/// Colour tag carried by a locked-in segment (grammatical gender for articles).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTag {
    Masculine,
    Feminine,
    Neuter,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DisplayMetadata {
    pub color: Option<ColorTag>,
}

/// A finished, non-editable piece of the word's display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorTag>,
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
        }
    }

    pub fn colored(text: impl Into<String>, color: Option<ColorTag>) -> Self {
        Self {
            text: text.into(),
            color,
        }
    }
}

/// Expected strings and display metadata for one word in one target language.
pub trait WordSource {
    fn word_type(&self) -> WordType;
    fn language(&self) -> Language;

    /// Exact literal text the user must reproduce in `phase`. Empty for phases
    /// the word has nothing to drill in.
    fn expected_input(&self, phase: DrillPhase) -> String;

    fn display_metadata(&self, _phase: DrillPhase) -> DisplayMetadata {
        DisplayMetadata::default()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrillEvent {
    Mismatch {
        phase: DrillPhase,
        index: usize,
        found: char,
    },
    ErrorCleared,
    PhaseChanged {
        from: DrillPhase,
        to: DrillPhase,
    },
    CompositionRepaired {
        restored_prefix: String,
    },
    WordComplete {
        mistakes: u32,
    },
}

/// Per-word drill state. `user_input` is always a prefix of `expected_input`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrillState {
    pub phase: DrillPhase,
    pub user_input: String,
    pub expected_input: String,
    pub has_error: bool,
    pub error_char: Option<char>,
    pub completed_segments: Vec<Segment>,
    /// Last validated `user_input`, captured while a composition is open.
    pub prefix_before_composition: Option<String>,
}

impl DrillState {
    fn new(phase: DrillPhase) -> Self {
        Self {
            phase,
            user_input: String::new(),
            expected_input: String::new(),
            has_error: false,
            error_char: None,
            completed_segments: Vec::new(),
            prefix_before_composition: None,
        }
    }

    pub fn is_composing(&self) -> bool {
        self.prefix_before_composition.is_some()
    }

    fn clear_error(&mut self) {
        self.has_error = false;
        self.error_char = None;
    }
}

/// Keystroke-level state machine for drilling a single word.
///
/// The host feeds it the accumulated value of its input box after every edit
/// and mirrors [`DrillEngine::box_value`] back into the box afterwards.
pub struct DrillEngine {
    state: DrillState,
    source: Box<dyn WordSource>,
    sequencer: Box<dyn PhaseSequencer>,
    order: Vec<DrillPhase>,
    position: usize,
    box_value: String,
    mistakes: u32,
    events: Vec<DrillEvent>,
}

impl DrillEngine {
    pub fn new(source: Box<dyn WordSource>, sequencer: Box<dyn PhaseSequencer>) -> Self {
        let order = sanitize_order(sequencer.phase_order(source.word_type(), source.language()));
        let mut engine = Self {
            state: DrillState::new(order[0]),
            source,
            sequencer,
            order,
            position: 0,
            box_value: String::new(),
            mistakes: 0,
            events: Vec::new(),
        };
        let (position, phase, expected) = engine.next_usable(None);
        engine.enter(position, phase, expected);
        engine.events.clear();
        engine
    }

    pub fn state(&self) -> &DrillState {
        &self.state
    }

    pub fn phase(&self) -> DrillPhase {
        self.state.phase
    }

    pub fn user_input(&self) -> &str {
        &self.state.user_input
    }

    pub fn expected_input(&self) -> &str {
        &self.state.expected_input
    }

    pub fn has_error(&self) -> bool {
        self.state.has_error
    }

    pub fn error_char(&self) -> Option<char> {
        self.state.error_char
    }

    pub fn completed_segments(&self) -> &[Segment] {
        &self.state.completed_segments
    }

    pub fn is_composing(&self) -> bool {
        self.state.is_composing()
    }

    pub fn is_complete(&self) -> bool {
        self.state.phase == DrillPhase::Complete
    }

    pub fn mistakes(&self) -> u32 {
        self.mistakes
    }

    pub fn phase_order(&self) -> &[DrillPhase] {
        &self.order
    }

    pub fn source(&self) -> &dyn WordSource {
        self.source.as_ref()
    }

    /// Value the host input box must show after the last operation.
    pub fn box_value(&self) -> &str {
        &self.box_value
    }

    /// Text to draw at the cursor: the provisional buffer while composing,
    /// the validated input otherwise.
    pub fn display_input(&self) -> &str {
        if self.state.is_composing() {
            &self.box_value
        } else {
            &self.state.user_input
        }
    }

    pub fn take_events(&mut self) -> Vec<DrillEvent> {
        std::mem::take(&mut self.events)
    }

    /// New accumulated value of the input box.
    pub fn on_input(&mut self, raw_value: &str) {
        if !self.state.phase.is_data_entry() {
            return;
        }
        if self.state.is_composing() {
            // Provisional glyphs such as a bare accent are never judged.
            self.box_value = raw_value.to_string();
            return;
        }
        self.validate(raw_value);
    }

    /// Delete/backspace pressed, before the host applies its own deletion.
    /// Returns `true` when the host must suppress the native deletion.
    pub fn on_backspace_key(&mut self) -> bool {
        if !self.state.phase.is_data_entry() || self.state.is_composing() {
            return false;
        }
        if self.state.has_error {
            self.state.clear_error();
            self.box_value = self.state.user_input.clone();
            self.events.push(DrillEvent::ErrorCleared);
            true
        } else {
            false
        }
    }

    pub fn on_composition_start(&mut self) {
        if !self.state.phase.is_data_entry() || self.state.is_composing() {
            return;
        }
        self.state.prefix_before_composition = Some(self.state.user_input.clone());
        self.box_value = self.state.user_input.clone();
    }

    /// Close a composition. `composition_data` is the composed text and
    /// `input_value` the box value the platform reported, which may have lost
    /// everything typed before the composition started.
    pub fn on_composition_end(&mut self, composition_data: &str, input_value: &str) {
        let prefix = self
            .state
            .prefix_before_composition
            .take()
            .unwrap_or_default();
        if !self.state.phase.is_data_entry() {
            return;
        }

        let reported = nfc(input_value);
        if reported.starts_with(prefix.as_str()) {
            let reported = reported.into_owned();
            self.validate(&reported);
        } else {
            let rebuilt = format!("{prefix}{composition_data}");
            tracing::debug!(
                prefix = %prefix,
                reported = %reported,
                rebuilt = %rebuilt,
                "composition lost prefix, rebuilding input"
            );
            self.events.push(DrillEvent::CompositionRepaired {
                restored_prefix: prefix,
            });
            self.validate(&rebuilt);
        }
    }

    /// Abandon an open composition without validating anything.
    pub fn on_composition_cancel(&mut self) {
        if self.state.prefix_before_composition.take().is_some() {
            self.box_value = self.state.user_input.clone();
        }
    }

    /// Advance one non-editable reveal phase.
    pub fn on_reveal(&mut self) -> bool {
        let from = self.state.phase;
        if !from.is_reveal() {
            return false;
        }
        self.advance(from, true);
        true
    }

    /// Skip every remaining reveal phase.
    pub fn reveal_all(&mut self) -> bool {
        let mut revealed = false;
        while self.on_reveal() {
            revealed = true;
        }
        revealed
    }

    fn validate(&mut self, raw_value: &str) {
        let raw = nfc(raw_value);
        let raw = raw.as_ref();
        let phase = self.state.phase;

        if self.awaits_separator() {
            let glue = self.pending_glue();
            if raw.strip_prefix(self.state.user_input.as_str()) == Some(glue.as_str()) {
                self.complete_phase();
                return;
            }
        }

        let expected = self.state.expected_input.as_str();
        let verdict = if raw == validator::expected_prefix(expected, raw) {
            Verdict::Prefix {
                complete: raw.len() == expected.len(),
            }
        } else {
            validator::check(expected, raw)
        };

        match verdict {
            Verdict::Prefix { complete } => {
                self.state.clear_error();
                self.state.user_input = raw.to_string();
                self.box_value = self.state.user_input.clone();
                if complete && !self.awaits_separator() {
                    self.complete_phase();
                }
            }
            Verdict::Mismatch {
                index,
                found,
                valid,
            } => {
                tracing::debug!(phase = %phase, index, found = %found, "input mismatch");
                self.state.has_error = true;
                self.state.error_char = Some(found);
                self.state.user_input = valid;
                self.box_value = self.state.user_input.clone();
                self.mistakes += 1;
                self.events.push(DrillEvent::Mismatch {
                    phase,
                    index,
                    found,
                });
            }
        }
    }

    /// The current phase is fully typed but still waits for its separator keystroke.
    fn awaits_separator(&self) -> bool {
        self.state.phase.awaits_typed_separator()
            && self.state.user_input == self.state.expected_input
            && !self.pending_glue().is_empty()
    }

    fn pending_glue(&self) -> String {
        let (_, next, _) = self.next_usable(Some(self.position));
        self.sequencer.transition_glue(self.state.phase, next)
    }

    fn complete_phase(&mut self) {
        let from = self.state.phase;
        let text = std::mem::take(&mut self.state.user_input);
        if !text.is_empty() {
            let meta = self.source.display_metadata(from);
            self.state
                .completed_segments
                .push(Segment::colored(text, meta.color));
        }
        self.advance(from, true);
    }

    fn advance(&mut self, from: DrillPhase, with_glue: bool) {
        let (position, next, expected) = self.next_usable(Some(self.position));
        if with_glue {
            let glue = self.sequencer.transition_glue(from, next);
            if !glue.is_empty() {
                self.state.completed_segments.push(Segment::plain(glue));
            }
        }
        self.enter(position, next, expected);
        tracing::debug!(from = %from, to = %next, "phase transition");
        self.events.push(DrillEvent::PhaseChanged { from, to: next });
        if next == DrillPhase::Complete {
            self.events.push(DrillEvent::WordComplete {
                mistakes: self.mistakes,
            });
        }
    }

    fn enter(&mut self, position: usize, phase: DrillPhase, expected: String) {
        self.position = position;
        self.state.phase = phase;
        self.state.expected_input = expected;
        self.state.user_input.clear();
        self.state.clear_error();
        self.state.prefix_before_composition = None;
        self.box_value.clear();
    }

    /// Next phase after `after` that can be entered, with its normalized
    /// expected string. Data-entry phases with nothing to type are skipped.
    fn next_usable(&self, after: Option<usize>) -> (usize, DrillPhase, String) {
        let start = after.map_or(0, |p| p + 1);
        for (position, &phase) in self.order.iter().enumerate().skip(start) {
            if !phase.is_data_entry() {
                return (position, phase, String::new());
            }
            let expected = nfc_owned(&self.source.expected_input(phase));
            if expected.is_empty() {
                tracing::debug!(phase = %phase, "nothing to drill, skipping phase");
                continue;
            }
            return (position, phase, expected);
        }
        (self.order.len() - 1, DrillPhase::Complete, String::new())
    }
}

/// Strictly forward order ending in `complete`.
fn sanitize_order(order: Vec<DrillPhase>) -> Vec<DrillPhase> {
    let mut out: Vec<DrillPhase> = Vec::with_capacity(order.len() + 1);
    for phase in order {
        if out.contains(&phase) {
            continue;
        }
        out.push(phase);
        if phase == DrillPhase::Complete {
            break;
        }
    }
    if out.last() != Some(&DrillPhase::Complete) {
        out.push(DrillPhase::Complete);
    }
    out
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use proptest::prelude::*;

    use super::*;
    use crate::engine::phase::StandardSequencer;

    struct FakeWord {
        word_type: WordType,
        language: Language,
        forms: HashMap<DrillPhase, String>,
        article_color: Option<ColorTag>,
    }

    impl FakeWord {
        fn noun(article: &str, singular: &str, plural: &str) -> Self {
            let forms = HashMap::from([
                (DrillPhase::Article, article.to_string()),
                (DrillPhase::Singular, singular.to_string()),
                (DrillPhase::Plural, plural.to_string()),
            ]);
            Self {
                word_type: WordType::Noun,
                language: Language::German,
                forms,
                article_color: Some(ColorTag::Feminine),
            }
        }

        fn verb(infinitive: &str, conjugation: &str) -> Self {
            let forms = HashMap::from([
                (DrillPhase::Infinitive, infinitive.to_string()),
                (DrillPhase::Conjugation, conjugation.to_string()),
            ]);
            Self {
                word_type: WordType::Verb,
                language: Language::German,
                forms,
                article_color: None,
            }
        }

        /// Single-phase word, used to exercise validation in isolation.
        fn single(expected: &str) -> Self {
            Self::verb(expected, "x")
        }
    }

    impl WordSource for FakeWord {
        fn word_type(&self) -> WordType {
            self.word_type
        }

        fn language(&self) -> Language {
            self.language
        }

        fn expected_input(&self, phase: DrillPhase) -> String {
            self.forms.get(&phase).cloned().unwrap_or_default()
        }

        fn display_metadata(&self, phase: DrillPhase) -> DisplayMetadata {
            match phase {
                DrillPhase::Article => DisplayMetadata {
                    color: self.article_color,
                },
                _ => DisplayMetadata::default(),
            }
        }
    }

    struct FixedOrder(Vec<DrillPhase>);

    impl PhaseSequencer for FixedOrder {
        fn phase_order(&self, _: WordType, _: Language) -> Vec<DrillPhase> {
            self.0.clone()
        }

        fn transition_glue(&self, _: DrillPhase, _: DrillPhase) -> String {
            String::new()
        }
    }

    fn engine(word: FakeWord) -> DrillEngine {
        DrillEngine::new(
            Box::new(word),
            Box::new(StandardSequencer::new(Language::German, false)),
        )
    }

    fn texts(engine: &DrillEngine) -> Vec<&str> {
        engine
            .completed_segments()
            .iter()
            .map(|s| s.text.as_str())
            .collect()
    }

    #[test]
    fn starts_in_first_phase_with_expected_string() {
        let e = engine(FakeWord::noun("die", "Mutter", "Mütter"));
        assert_eq!(e.phase(), DrillPhase::Article);
        assert_eq!(e.expected_input(), "die");
        assert_eq!(e.user_input(), "");
        assert!(!e.has_error());
    }

    #[test]
    fn wrong_character_keeps_valid_prefix() {
        let mut e = engine(FakeWord::single("hören"));
        e.on_input("h");
        e.on_input("hö");
        e.on_input("höx");
        assert!(e.has_error());
        assert_eq!(e.error_char(), Some('x'));
        assert_eq!(e.user_input(), "hö");
        assert_eq!(e.box_value(), "hö");
        assert_eq!(e.mistakes(), 1);
    }

    #[test]
    fn error_at_first_position_yields_empty_input() {
        let mut e = engine(FakeWord::single("hören"));
        e.on_input("x");
        assert!(e.has_error());
        assert_eq!(e.user_input(), "");
    }

    #[test]
    fn backspace_with_error_only_clears_error() {
        let mut e = engine(FakeWord::single("hören"));
        e.on_input("hö");
        e.on_input("höx");
        assert!(e.on_backspace_key());
        assert!(!e.has_error());
        assert_eq!(e.error_char(), None);
        assert_eq!(e.user_input(), "hö");
    }

    #[test]
    fn backspace_without_error_is_not_intercepted() {
        let mut e = engine(FakeWord::single("hören"));
        e.on_input("hör");
        assert!(!e.on_backspace_key());
        // Host deletes natively and reports the shorter value.
        e.on_input("hö");
        assert_eq!(e.user_input(), "hö");
        assert!(!e.has_error());
    }

    #[test]
    fn repeated_error_backspace_cycles_keep_prefix() {
        let mut e = engine(FakeWord::single("hören"));
        e.on_input("hö");
        for wrong in ["höx", "höy", "höz"] {
            e.on_input(wrong);
            assert_eq!(e.user_input(), "hö");
            assert!(e.on_backspace_key());
            assert_eq!(e.user_input(), "hö");
        }
        assert_eq!(e.mistakes(), 3);
    }

    #[test]
    fn revalidating_same_input_is_noop() {
        let mut e = engine(FakeWord::single("hören"));
        e.on_input("hör");
        let before = e.state().clone();
        let input = e.user_input().to_string();
        e.on_input(&input);
        assert_eq!(e.state(), &before);
    }

    #[test]
    fn valid_edit_clears_error() {
        let mut e = engine(FakeWord::single("hören"));
        e.on_input("hx");
        assert!(e.has_error());
        e.on_input("hö");
        assert!(!e.has_error());
        assert_eq!(e.user_input(), "hö");
    }

    #[test]
    fn article_waits_for_space() {
        let mut e = engine(FakeWord::noun("die", "Mutter", "Mütter"));
        e.on_input("die");
        assert_eq!(e.phase(), DrillPhase::Article);
        assert_eq!(e.user_input(), "die");
        assert!(e.completed_segments().is_empty());

        e.on_input("die ");
        assert_eq!(e.phase(), DrillPhase::Singular);
        assert_eq!(e.user_input(), "");
        assert_eq!(texts(&e), vec!["die", " "]);
        assert_eq!(e.completed_segments()[0].color, Some(ColorTag::Feminine));
        assert_eq!(e.completed_segments()[1].color, None);
    }

    #[test]
    fn early_space_in_article_is_an_error() {
        let mut e = engine(FakeWord::noun("die", "Mutter", "Mütter"));
        e.on_input("di");
        e.on_input("di ");
        assert!(e.has_error());
        assert_eq!(e.error_char(), Some(' '));
        assert_eq!(e.user_input(), "di");
        assert_eq!(e.phase(), DrillPhase::Article);
    }

    #[test]
    fn wrong_character_after_complete_article_is_an_error() {
        let mut e = engine(FakeWord::noun("die", "Mutter", "Mütter"));
        e.on_input("die");
        e.on_input("diex");
        assert!(e.has_error());
        assert_eq!(e.error_char(), Some('x'));
        assert_eq!(e.user_input(), "die");
        // The space still locks the article in afterwards.
        e.on_input("die ");
        assert_eq!(e.phase(), DrillPhase::Singular);
    }

    #[test]
    fn noun_end_to_end() {
        let mut e = engine(FakeWord::noun("die", "Mutter", "Mütter"));
        e.on_input("die");
        e.on_input("die ");
        e.on_input("Mutter");
        assert_eq!(e.phase(), DrillPhase::Plural);
        e.on_input("Mütter");
        assert_eq!(texts(&e), vec!["die", " ", "Mutter", ", ", "Mütter"]);
        assert_eq!(e.phase(), DrillPhase::Translation);
    }

    #[test]
    fn verb_end_to_end_rejects_pronoun() {
        let mut e = engine(FakeWord::verb("hören", "hörst"));
        e.on_input("hören");
        assert_eq!(e.phase(), DrillPhase::Conjugation);
        e.on_input("d");
        assert!(e.has_error());
        assert_eq!(e.error_char(), Some('d'));
        assert_eq!(e.user_input(), "");
        e.on_input("hörst");
        assert_eq!(texts(&e), vec!["hören", ", du ", "hörst"]);
        assert_eq!(e.phase(), DrillPhase::Translation);
    }

    #[test]
    fn reveal_phases_advance_to_complete() {
        let mut e = engine(FakeWord::verb("hören", "hörst"));
        e.on_input("hören");
        e.on_input("hörst");
        assert!(e.on_reveal());
        assert_eq!(e.phase(), DrillPhase::ExampleTarget);
        assert!(e.on_reveal());
        assert_eq!(e.phase(), DrillPhase::ExampleBase);
        assert!(e.on_reveal());
        assert!(e.is_complete());
        assert!(!e.on_reveal());

        let events = e.take_events();
        assert!(events.contains(&DrillEvent::WordComplete { mistakes: 0 }));
    }

    #[test]
    fn reveal_is_refused_in_data_entry() {
        let mut e = engine(FakeWord::verb("hören", "hörst"));
        assert!(!e.on_reveal());
        assert!(!e.reveal_all());
        assert_eq!(e.phase(), DrillPhase::Infinitive);
    }

    #[test]
    fn reveal_all_jumps_to_complete() {
        let mut e = engine(FakeWord::verb("hören", "hörst"));
        e.on_input("hören");
        e.on_input("hx");
        e.on_input("hörst");
        assert!(e.reveal_all());
        assert!(e.is_complete());
        assert!(
            e.take_events()
                .contains(&DrillEvent::WordComplete { mistakes: 1 })
        );
    }

    #[test]
    fn complete_phase_ignores_everything() {
        let mut e = engine(FakeWord::verb("hören", "hörst"));
        e.on_input("hören");
        e.on_input("hörst");
        e.reveal_all();
        let before = e.state().clone();
        e.on_input("x");
        e.on_composition_start();
        e.on_composition_end("ö", "ö");
        assert!(!e.on_backspace_key());
        assert_eq!(e.state(), &before);
    }

    #[test]
    fn composition_repairs_lost_prefix() {
        let mut e = engine(FakeWord::single("hören"));
        e.on_input("h");
        e.on_composition_start();
        assert_eq!(e.state().prefix_before_composition.as_deref(), Some("h"));
        e.on_input("h\u{a8}");
        assert_eq!(e.user_input(), "h");
        assert_eq!(e.display_input(), "h\u{a8}");
        assert!(!e.has_error());

        e.on_composition_end("ö", "ö");
        assert_eq!(e.user_input(), "hö");
        assert_eq!(e.box_value(), "hö");
        assert!(!e.has_error());
        assert!(!e.is_composing());
        assert!(e.take_events().contains(&DrillEvent::CompositionRepaired {
            restored_prefix: "h".to_string()
        }));
    }

    #[test]
    fn composition_ideal_path_validates_reported_value() {
        let mut e = engine(FakeWord::single("hören"));
        e.on_input("h");
        e.on_composition_start();
        e.on_input("h\u{a8}");
        e.on_composition_end("ö", "hö");
        assert_eq!(e.user_input(), "hö");
        assert!(e.take_events().is_empty());
    }

    #[test]
    fn composition_rejects_wrong_composed_character() {
        let mut e = engine(FakeWord::single("hören"));
        e.on_input("h");
        e.on_composition_start();
        e.on_composition_end("ü", "ü");
        assert!(e.has_error());
        assert_eq!(e.error_char(), Some('ü'));
        assert_eq!(e.user_input(), "h");
        assert_eq!(e.box_value(), "h");
    }

    #[test]
    fn composition_end_without_start_validates_directly() {
        let mut e = engine(FakeWord::single("hören"));
        e.on_composition_end("h", "h");
        assert_eq!(e.user_input(), "h");
        assert!(!e.has_error());
    }

    #[test]
    fn composition_in_the_middle_of_a_word() {
        let mut e = engine(FakeWord::single("schläfst"));
        e.on_input("schl");
        e.on_composition_start();
        e.on_input("schl\u{a8}");
        e.on_composition_end("ä", "ä");
        assert_eq!(e.user_input(), "schlä");
        e.on_input("schläf");
        assert_eq!(e.user_input(), "schläf");
    }

    #[test]
    fn composition_cancel_restores_box() {
        let mut e = engine(FakeWord::single("hören"));
        e.on_input("h");
        e.on_composition_start();
        e.on_input("h\u{a8}");
        e.on_composition_cancel();
        assert!(!e.is_composing());
        assert_eq!(e.box_value(), "h");
        assert_eq!(e.user_input(), "h");
    }

    #[test]
    fn backspace_is_not_intercepted_while_composing() {
        let mut e = engine(FakeWord::single("hören"));
        e.on_input("hx");
        e.on_composition_start();
        assert!(!e.on_backspace_key());
    }

    #[test]
    fn decomposed_input_matches_precomposed_expected() {
        let mut e = engine(FakeWord::single("hören"));
        e.on_input("ho\u{308}");
        assert!(!e.has_error());
        assert_eq!(e.user_input(), "hö");
    }

    #[test]
    fn empty_phase_is_skipped_without_segments() {
        // No article: the word starts at the singular and no space is glued in.
        let mut e = engine(FakeWord::noun("", "Handy", "Handys"));
        assert_eq!(e.phase(), DrillPhase::Singular);
        e.on_input("Handy");
        e.on_input("Handys");
        assert_eq!(texts(&e), vec!["Handy", ", ", "Handys"]);
    }

    #[test]
    fn all_empty_word_goes_to_first_reveal() {
        let e = engine(FakeWord::noun("", "", ""));
        assert_eq!(e.phase(), DrillPhase::Translation);
        assert!(e.completed_segments().is_empty());
    }

    #[test]
    fn order_without_complete_still_terminates() {
        let mut e = DrillEngine::new(
            Box::new(FakeWord::single("ab")),
            Box::new(FixedOrder(vec![
                DrillPhase::Infinitive,
                DrillPhase::Infinitive,
                DrillPhase::Translation,
            ])),
        );
        assert_eq!(
            e.phase_order(),
            &[
                DrillPhase::Infinitive,
                DrillPhase::Translation,
                DrillPhase::Complete
            ]
        );
        e.on_input("ab");
        assert_eq!(e.phase(), DrillPhase::Translation);
        assert!(e.on_reveal());
        assert!(e.is_complete());
    }

    #[test]
    fn article_without_glue_completes_on_match() {
        let mut e = DrillEngine::new(
            Box::new(FakeWord::noun("die", "Mutter", "Mütter")),
            Box::new(FixedOrder(vec![DrillPhase::Article, DrillPhase::Singular])),
        );
        e.on_input("die");
        assert_eq!(e.phase(), DrillPhase::Singular);
        assert_eq!(texts(&e), vec!["die"]);
    }

    #[test]
    fn phase_events_are_reported_in_order() {
        let mut e = engine(FakeWord::noun("die", "Mutter", "Mütter"));
        e.on_input("die");
        e.on_input("die ");
        e.on_input("Mutter");
        let events = e.take_events();
        assert_eq!(
            events,
            vec![
                DrillEvent::PhaseChanged {
                    from: DrillPhase::Article,
                    to: DrillPhase::Singular
                },
                DrillEvent::PhaseChanged {
                    from: DrillPhase::Singular,
                    to: DrillPhase::Plural
                },
            ]
        );
        assert!(e.take_events().is_empty());
    }

    proptest! {
        #[test]
        fn user_input_is_always_a_prefix(
            values in proptest::collection::vec("[hörenx ]{0,7}", 1..24)
        ) {
            let mut e = engine(FakeWord::single("hören"));
            for value in &values {
                e.on_input(value);
                if e.phase() != DrillPhase::Infinitive {
                    break;
                }
                prop_assert!(e.expected_input().starts_with(e.user_input()));
                prop_assert_eq!(e.box_value(), e.user_input());
            }
        }

        #[test]
        fn one_wrong_character_never_destroys_prefix(len in 0usize..5, wrong in "[a-z]") {
            let expected = "hören";
            let prefix: String = expected.chars().take(len).collect();
            let next = expected.chars().nth(len).unwrap();
            prop_assume!(!wrong.starts_with(next));

            let mut e = engine(FakeWord::single(expected));
            e.on_input(&prefix);
            e.on_input(&format!("{prefix}{wrong}"));
            prop_assert!(e.has_error());
            prop_assert_eq!(e.user_input(), prefix.as_str());
            prop_assert!(e.on_backspace_key());
            prop_assert_eq!(e.user_input(), prefix.as_str());
            prop_assert!(!e.has_error());
        }
    }
}
