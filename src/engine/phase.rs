use serde::{Deserialize, Serialize};

use crate::vocab::{Language, WordType};

/// One sub-step of drilling a single word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DrillPhase {
    Article,
    Singular,
    Plural,
    Definite,
    Infinitive,
    Conjugation,
    Conjugation2,
    Conjugation3,
    Translation,
    ExampleTarget,
    ExampleBase,
    Complete,
}

impl DrillPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            DrillPhase::Article => "article",
            DrillPhase::Singular => "singular",
            DrillPhase::Plural => "plural",
            DrillPhase::Definite => "definite",
            DrillPhase::Infinitive => "infinitive",
            DrillPhase::Conjugation => "conjugation",
            DrillPhase::Conjugation2 => "conjugation2",
            DrillPhase::Conjugation3 => "conjugation3",
            DrillPhase::Translation => "translation",
            DrillPhase::ExampleTarget => "example-target",
            DrillPhase::ExampleBase => "example-base",
            DrillPhase::Complete => "complete",
        }
    }

    /// Phases the user types into.
    pub fn is_data_entry(self) -> bool {
        matches!(
            self,
            DrillPhase::Article
                | DrillPhase::Singular
                | DrillPhase::Plural
                | DrillPhase::Definite
                | DrillPhase::Infinitive
                | DrillPhase::Conjugation
                | DrillPhase::Conjugation2
                | DrillPhase::Conjugation3
        )
    }

    /// Non-editable phases advanced by an explicit reveal.
    pub fn is_reveal(self) -> bool {
        matches!(
            self,
            DrillPhase::Translation | DrillPhase::ExampleTarget | DrillPhase::ExampleBase
        )
    }

    pub fn is_conjugation(self) -> bool {
        matches!(
            self,
            DrillPhase::Conjugation | DrillPhase::Conjugation2 | DrillPhase::Conjugation3
        )
    }

    /// A phase whose completion waits for the user to type the glue that follows it.
    /// Only the noun article: "die" is locked in by the space after it.
    pub fn awaits_typed_separator(self) -> bool {
        self == DrillPhase::Article
    }
}

impl std::fmt::Display for DrillPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Supplies the phase order for a word and the fixed text inserted between phases.
pub trait PhaseSequencer {
    fn phase_order(&self, word_type: WordType, language: Language) -> Vec<DrillPhase>;

    /// Fixed separator/prefix text locked in as its own segment on the
    /// transition `from -> to`. Empty when nothing is inserted.
    fn transition_glue(&self, from: DrillPhase, to: DrillPhase) -> String;
}

const REVEAL_TAIL: [DrillPhase; 4] = [
    DrillPhase::Translation,
    DrillPhase::ExampleTarget,
    DrillPhase::ExampleBase,
    DrillPhase::Complete,
];

/// Phase ordering and glue for the bundled languages.
#[derive(Clone, Copy, Debug)]
pub struct StandardSequencer {
    pub language: Language,
    pub full_conjugation: bool,
}

impl StandardSequencer {
    pub fn new(language: Language, full_conjugation: bool) -> Self {
        Self {
            language,
            full_conjugation,
        }
    }
}

impl PhaseSequencer for StandardSequencer {
    fn phase_order(&self, word_type: WordType, language: Language) -> Vec<DrillPhase> {
        let mut order = Vec::with_capacity(10);
        match word_type {
            WordType::Noun => {
                if language.has_gender() {
                    order.push(DrillPhase::Article);
                }
                order.push(DrillPhase::Singular);
                order.push(DrillPhase::Plural);
                if language.has_definite_form() {
                    order.push(DrillPhase::Definite);
                }
            }
            WordType::Verb => {
                order.push(DrillPhase::Infinitive);
                order.push(DrillPhase::Conjugation);
                if self.full_conjugation {
                    order.push(DrillPhase::Conjugation2);
                    if language.drilled_verb_forms() >= 3 {
                        order.push(DrillPhase::Conjugation3);
                    }
                }
            }
        }
        order.extend_from_slice(&REVEAL_TAIL);
        order
    }

    fn transition_glue(&self, from: DrillPhase, to: DrillPhase) -> String {
        match (from, to) {
            (DrillPhase::Article, DrillPhase::Singular) => " ".to_string(),
            (DrillPhase::Singular, DrillPhase::Plural)
            | (DrillPhase::Plural, DrillPhase::Definite) => ", ".to_string(),
            (_, to) if to.is_conjugation() => match self.language.second_person_pronoun() {
                Some(pronoun) => format!(", {pronoun} "),
                None => ", ".to_string(),
            },
            _ => String::new(),
        }
    }
}
