use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::store::schema::ProgressData;
use crate::vocab::source::WordCard;
use crate::vocab::{Vocabulary, WordType};

/// Words for one session: overdue reviews first (oldest first), then words
/// never seen before in random order.
pub fn build_queue(
    vocab: &Vocabulary,
    progress: &ProgressData,
    word_types: &[WordType],
    size: usize,
    now: DateTime<Utc>,
    rng: &mut SmallRng,
) -> Vec<WordCard> {
    let mut due = Vec::new();
    let mut fresh = Vec::new();

    for word in &vocab.words {
        if !word_types.contains(&word.word_type()) {
            continue;
        }
        let card = WordCard::new(word.clone(), vocab.language);
        match progress.get(&card.id()) {
            Some(record) if record.is_due(now) => due.push((record.next_review, card)),
            Some(_) => {}
            None => fresh.push(card),
        }
    }

    due.sort_by_key(|(next_review, _)| *next_review);
    fresh.shuffle(rng);

    let mut queue: Vec<WordCard> = due.into_iter().map(|(_, card)| card).collect();
    queue.extend(fresh);
    queue.truncate(size);
    tracing::debug!(words = queue.len(), "built session queue");
    queue
}

/// Session queue seeded from entropy.
pub fn build_session_queue(
    vocab: &Vocabulary,
    progress: &ProgressData,
    word_types: &[WordType],
    size: usize,
) -> Vec<WordCard> {
    let mut rng = SmallRng::from_entropy();
    build_queue(vocab, progress, word_types, size, Utc::now(), &mut rng)
}
