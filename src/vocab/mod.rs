pub mod source;

use std::collections::BTreeMap;
use std::fmt;

use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Embed)]
#[folder = "assets/vocab/"]
struct VocabAssets;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "de")]
    German,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "no")]
    Norwegian,
    #[serde(rename = "en")]
    English,
}

pub const ALL_LANGUAGES: [Language; 5] = [
    Language::German,
    Language::French,
    Language::Spanish,
    Language::Norwegian,
    Language::English,
];

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::German => "de",
            Language::French => "fr",
            Language::Spanish => "es",
            Language::Norwegian => "no",
            Language::English => "en",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        ALL_LANGUAGES.into_iter().find(|l| l.code() == code)
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::German => "German",
            Language::French => "French",
            Language::Spanish => "Spanish",
            Language::Norwegian => "Norwegian",
            Language::English => "English",
        }
    }

    pub fn native_name(self) -> &'static str {
        match self {
            Language::German => "Deutsch",
            Language::French => "Français",
            Language::Spanish => "Español",
            Language::Norwegian => "Norsk",
            Language::English => "English",
        }
    }

    /// Nouns are drilled with their article.
    pub fn has_gender(self) -> bool {
        self != Language::English
    }

    /// Nouns carry a drilled definite singular form (suffixed article).
    pub fn has_definite_form(self) -> bool {
        self == Language::Norwegian
    }

    /// Number of conjugated verb forms drilled in full conjugation mode.
    pub fn drilled_verb_forms(self) -> usize {
        match self {
            Language::English => 2,
            _ => 3,
        }
    }

    /// Spoken context shown before conjugated forms, never typed.
    pub fn second_person_pronoun(self) -> Option<&'static str> {
        match self {
            Language::German => Some("du"),
            Language::French => Some("tu"),
            Language::Spanish => Some("tú"),
            Language::Norwegian | Language::English => None,
        }
    }

    pub fn article(self, gender: Option<Gender>) -> &'static str {
        match (self, gender) {
            (Language::German, Some(Gender::Masculine)) => "der",
            (Language::German, Some(Gender::Feminine)) => "die",
            (Language::German, Some(Gender::Neuter)) => "das",
            (Language::French, Some(Gender::Masculine)) => "le",
            (Language::French, Some(Gender::Feminine)) => "la",
            (Language::Spanish, Some(Gender::Masculine)) => "el",
            (Language::Spanish, Some(Gender::Feminine)) => "la",
            (Language::Norwegian, Some(Gender::Masculine)) => "en",
            (Language::Norwegian, Some(Gender::Feminine)) => "ei",
            (Language::Norwegian, Some(Gender::Neuter)) => "et",
            _ => "",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordType {
    Noun,
    Verb,
}

impl WordType {
    pub fn as_str(self) -> &'static str {
        match self {
            WordType::Noun => "noun",
            WordType::Verb => "verb",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Masculine,
    Feminine,
    Neuter,
}

pub type Translations = BTreeMap<Language, String>;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Example {
    pub text: String,
    #[serde(default)]
    pub translations: Translations,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Noun {
    pub singular: String,
    #[serde(default)]
    pub gender: Option<Gender>,
    pub plural: String,
    #[serde(default)]
    pub definite: Option<String>,
    #[serde(default)]
    pub translations: Translations,
    pub example: Option<Example>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Verb {
    pub infinitive: String,
    /// Drilled conjugated forms in phase order, without the pronoun.
    #[serde(default)]
    pub conjugations: Vec<String>,
    #[serde(default)]
    pub translations: Translations,
    pub example: Option<Example>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Word {
    Noun(Noun),
    Verb(Verb),
}

impl Word {
    pub fn word_type(&self) -> WordType {
        match self {
            Word::Noun(_) => WordType::Noun,
            Word::Verb(_) => WordType::Verb,
        }
    }

    pub fn lemma(&self) -> &str {
        match self {
            Word::Noun(n) => &n.singular,
            Word::Verb(v) => &v.infinitive,
        }
    }

    /// Stable progress key, e.g. `de:noun:Haus`.
    pub fn id(&self, language: Language) -> String {
        format!("{}:{}:{}", language.code(), self.word_type().as_str(), self.lemma())
    }

    fn translations(&self) -> &Translations {
        match self {
            Word::Noun(n) => &n.translations,
            Word::Verb(v) => &v.translations,
        }
    }

    pub fn example(&self) -> Option<&Example> {
        match self {
            Word::Noun(n) => n.example.as_ref(),
            Word::Verb(v) => v.example.as_ref(),
        }
    }

    /// Translation into `base`, falling back to English.
    pub fn translation(&self, base: Language) -> Option<&str> {
        let translations = self.translations();
        translations
            .get(&base)
            .or_else(|| translations.get(&Language::English))
            .map(String::as_str)
    }
}

impl Example {
    pub fn translation(&self, base: Language) -> Option<&str> {
        self.translations
            .get(&base)
            .or_else(|| self.translations.get(&Language::English))
            .map(String::as_str)
    }
}

#[derive(Debug, Error)]
pub enum VocabError {
    #[error("no bundled vocabulary for language `{0}`")]
    Missing(Language),
    #[error("vocabulary for `{language}` is not valid UTF-8")]
    Encoding { language: Language },
    #[error("failed to parse vocabulary for `{language}`: {source}")]
    Parse {
        language: Language,
        #[source]
        source: serde_json::Error,
    },
    #[error("vocabulary file for `{expected}` declares language `{found}`")]
    LanguageMismatch { expected: Language, found: Language },
    #[error("word `{0}` has an empty lemma")]
    EmptyLemma(String),
}

#[derive(Debug, Deserialize)]
struct VocabFile {
    language: Language,
    words: Vec<Word>,
}

/// Words of one target language.
#[derive(Clone, Debug)]
pub struct Vocabulary {
    pub language: Language,
    pub words: Vec<Word>,
}

impl Vocabulary {
    pub fn load(language: Language) -> Result<Self, VocabError> {
        let filename = format!("{}.json", language.code());
        let file = VocabAssets::get(&filename).ok_or(VocabError::Missing(language))?;
        let content = std::str::from_utf8(file.data.as_ref())
            .map_err(|_| VocabError::Encoding { language })?;
        Self::from_json(language, content)
    }

    pub fn from_json(language: Language, content: &str) -> Result<Self, VocabError> {
        let parsed: VocabFile = serde_json::from_str(content)
            .map_err(|source| VocabError::Parse { language, source })?;
        if parsed.language != language {
            return Err(VocabError::LanguageMismatch {
                expected: language,
                found: parsed.language,
            });
        }
        if let Some(word) = parsed.words.iter().find(|w| w.lemma().trim().is_empty()) {
            return Err(VocabError::EmptyLemma(word.id(language)));
        }
        Ok(Self {
            language,
            words: parsed.words,
        })
    }

    pub fn available_languages() -> Vec<Language> {
        ALL_LANGUAGES
            .into_iter()
            .filter(|l| VocabAssets::get(&format!("{}.json", l.code())).is_some())
            .collect()
    }

    pub fn find(&self, id: &str) -> Option<&Word> {
        self.words.iter().find(|w| w.id(self.language) == id)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
