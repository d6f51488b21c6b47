use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::engine::scheduler::{self, INITIAL_EASE, MASTERED_INTERVAL};

pub const SCHEMA_VERSION: u32 = 1;

/// Learning progress for one word.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub word_id: String,
    pub correct_count: u32,
    pub incorrect_count: u32,
    pub last_reviewed: DateTime<Utc>,
    pub next_review: DateTime<Utc>,
    #[serde(default = "default_ease")]
    pub ease_factor: f64,
    /// Days until the next review.
    #[serde(default)]
    pub interval: u32,
}

fn default_ease() -> f64 {
    INITIAL_EASE
}

impl ProgressRecord {
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review <= now
    }

    pub fn is_mastered(&self) -> bool {
        self.interval >= MASTERED_INTERVAL
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProgressData {
    pub schema_version: u32,
    #[serde(default)]
    pub records: BTreeMap<String, ProgressRecord>,
}

impl Default for ProgressData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            records: BTreeMap::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProgressStats {
    pub total: usize,
    pub learned: usize,
    pub mastered: usize,
    pub total_correct: u32,
    pub total_incorrect: u32,
    /// Whole percent, 0 when nothing was attempted.
    pub accuracy: u32,
    pub due: usize,
}

impl ProgressData {
    /// Check if loaded data has a stale schema version and needs reset.
    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }

    pub fn get(&self, word_id: &str) -> Option<&ProgressRecord> {
        self.records.get(word_id)
    }

    /// Score one finished attempt and reschedule the word.
    pub fn record_attempt(
        &mut self,
        word_id: &str,
        correct: bool,
        now: DateTime<Utc>,
    ) -> &ProgressRecord {
        let existing = self.records.get(word_id);
        let ease = existing.map_or(INITIAL_EASE, |r| r.ease_factor);
        let interval = existing.map_or(0, |r| r.interval);
        let review = scheduler::next_review(correct, ease, interval, now);

        let record = self
            .records
            .entry(word_id.to_string())
            .or_insert_with(|| ProgressRecord {
                word_id: word_id.to_string(),
                correct_count: 0,
                incorrect_count: 0,
                last_reviewed: now,
                next_review: now,
                ease_factor: INITIAL_EASE,
                interval: 0,
            });
        if correct {
            record.correct_count += 1;
        } else {
            record.incorrect_count += 1;
        }
        record.last_reviewed = now;
        record.next_review = review.next_review;
        record.ease_factor = review.ease_factor;
        record.interval = review.interval;
        record
    }

    /// Summary over the given vocabulary. Words never attempted count as due.
    pub fn stats<'a>(
        &self,
        word_ids: impl IntoIterator<Item = &'a str>,
        now: DateTime<Utc>,
    ) -> ProgressStats {
        let mut stats = ProgressStats::default();
        for id in word_ids {
            stats.total += 1;
            match self.records.get(id) {
                Some(record) => {
                    if record.correct_count > 0 {
                        stats.learned += 1;
                    }
                    if record.is_mastered() {
                        stats.mastered += 1;
                    }
                    if record.is_due(now) {
                        stats.due += 1;
                    }
                    stats.total_correct += record.correct_count;
                    stats.total_incorrect += record.incorrect_count;
                }
                None => stats.due += 1,
            }
        }
        let attempts = stats.total_correct + stats.total_incorrect;
        if attempts > 0 {
            stats.accuracy =
                ((stats.total_correct as f64 / attempts as f64) * 100.0).round() as u32;
        }
        stats
    }
}

pub const EXPORT_VERSION: u32 = 1;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExportData {
    pub wortdrill_export_version: u32,
    pub exported_at: DateTime<Utc>,
    pub config: Config,
    pub progress: ProgressData,
}
