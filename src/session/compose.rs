use crate::engine::normalize::nfc;

/// Keys that start a composition and the combining mark they apply.
pub const DEAD_KEYS: [(char, char); 5] = [
    ('"', '\u{0308}'),
    ('^', '\u{0302}'),
    ('`', '\u{0300}'),
    ('\'', '\u{0301}'),
    ('~', '\u{0303}'),
];

fn combining_mark(dead: char) -> Option<char> {
    DEAD_KEYS
        .iter()
        .find(|(key, _)| *key == dead)
        .map(|(_, mark)| *mark)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Plain character, no composition involved.
    Insert(char),
    /// A dead key was pressed; the character is its provisional glyph.
    Begin(char),
    /// The composition closed with this committed text.
    End(String),
}

/// Dead-key state for a terminal that only delivers plain key presses.
#[derive(Clone, Debug, Default)]
pub struct DeadKeyComposer {
    enabled: bool,
    pending: Option<char>,
}

impl DeadKeyComposer {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            pending: None,
        }
    }

    pub fn is_composing(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<char> {
        self.pending
    }

    pub fn feed(&mut self, ch: char) -> KeyOutcome {
        match self.pending.take() {
            Some(dead) => KeyOutcome::End(compose(dead, ch)),
            None if self.enabled && combining_mark(ch).is_some() => {
                self.pending = Some(ch);
                KeyOutcome::Begin(ch)
            }
            None => KeyOutcome::Insert(ch),
        }
    }

    /// Drop a pending dead key. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }
}

/// Text committed by `dead` followed by `next`.
pub fn compose(dead: char, next: char) -> String {
    if next == ' ' {
        return dead.to_string();
    }
    if let Some(mark) = combining_mark(dead) {
        let decomposed: String = [next, mark].into_iter().collect();
        let composed = nfc(&decomposed);
        let mut chars = composed.chars();
        if let (Some(single), None) = (chars.next(), chars.next()) {
            return single.to_string();
        }
    }
    [dead, next].into_iter().collect()
}
