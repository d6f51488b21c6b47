use std::borrow::Cow;

use icu_normalizer::ComposingNormalizerBorrowed;

const NFC: ComposingNormalizerBorrowed<'static> = ComposingNormalizerBorrowed::new_nfc();

/// Canonical composition. Expected strings and raw input both pass through here
/// so a decomposed "o" + U+0308 compares equal to a precomposed "ö".
pub fn nfc(text: &str) -> Cow<'_, str> {
    NFC.normalize(text)
}

pub fn nfc_owned(text: &str) -> String {
    nfc(text).into_owned()
}
