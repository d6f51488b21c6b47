use crate::engine::{ColorTag, DisplayMetadata, DrillPhase, WordSource};
use crate::vocab::{Gender, Language, Word, WordType};

/// One vocabulary word bound to its target language.
#[derive(Clone, Debug)]
pub struct WordCard {
    pub word: Word,
    pub language: Language,
}

impl WordCard {
    pub fn new(word: Word, language: Language) -> Self {
        Self { word, language }
    }

    pub fn id(&self) -> String {
        self.word.id(self.language)
    }
}

fn gender_color(gender: Gender) -> ColorTag {
    match gender {
        Gender::Masculine => ColorTag::Masculine,
        Gender::Feminine => ColorTag::Feminine,
        Gender::Neuter => ColorTag::Neuter,
    }
}

impl WordSource for WordCard {
    fn word_type(&self) -> WordType {
        self.word.word_type()
    }

    fn language(&self) -> Language {
        self.language
    }

    fn expected_input(&self, phase: DrillPhase) -> String {
        let form = match (&self.word, phase) {
            (Word::Noun(n), DrillPhase::Article) => self.language.article(n.gender),
            (Word::Noun(n), DrillPhase::Singular) => n.singular.as_str(),
            (Word::Noun(n), DrillPhase::Plural) => n.plural.as_str(),
            (Word::Noun(n), DrillPhase::Definite) => n.definite.as_deref().unwrap_or(""),
            (Word::Verb(v), DrillPhase::Infinitive) => v.infinitive.as_str(),
            (Word::Verb(v), DrillPhase::Conjugation) => form_at(&v.conjugations, 0),
            (Word::Verb(v), DrillPhase::Conjugation2) => form_at(&v.conjugations, 1),
            (Word::Verb(v), DrillPhase::Conjugation3) => form_at(&v.conjugations, 2),
            _ => "",
        };
        form.to_string()
    }

    fn display_metadata(&self, phase: DrillPhase) -> DisplayMetadata {
        match (&self.word, phase) {
            (Word::Noun(n), DrillPhase::Article) => DisplayMetadata {
                color: n.gender.map(gender_color),
            },
            _ => DisplayMetadata::default(),
        }
    }
}

fn form_at(forms: &[String], index: usize) -> &str {
    forms.get(index).map(String::as_str).unwrap_or("")
}
