use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of drilling one word to completion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttemptResult {
    pub word_id: String,
    pub correct: bool,
    pub mistakes: u32,
    pub elapsed_secs: f64,
    pub timestamp: DateTime<Utc>,
}

impl AttemptResult {
    /// An attempt is correct when no keystroke was rejected.
    pub fn new(word_id: String, mistakes: u32, elapsed: Duration, timestamp: DateTime<Utc>) -> Self {
        Self {
            word_id,
            correct: mistakes == 0,
            mistakes,
            elapsed_secs: elapsed.as_secs_f64(),
            timestamp,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionSummary {
    pub attempts: Vec<AttemptResult>,
}

impl SessionSummary {
    pub fn push(&mut self, attempt: AttemptResult) {
        self.attempts.push(attempt);
    }

    pub fn words(&self) -> usize {
        self.attempts.len()
    }

    pub fn correct(&self) -> usize {
        self.attempts.iter().filter(|a| a.correct).count()
    }

    pub fn mistakes(&self) -> u32 {
        self.attempts.iter().map(|a| a.mistakes).sum()
    }

    /// Whole percent of words finished without a mistake.
    pub fn accuracy(&self) -> u32 {
        if self.attempts.is_empty() {
            return 0;
        }
        ((self.correct() as f64 / self.words() as f64) * 100.0).round() as u32
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.attempts.iter().map(|a| a.elapsed_secs).sum()
    }

    /// Words that need another look, in the order they were drilled.
    pub fn missed(&self) -> impl Iterator<Item = &str> {
        self.attempts
            .iter()
            .filter(|a| !a.correct)
            .map(|a| a.word_id.as_str())
    }
}
