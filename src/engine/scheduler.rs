use chrono::{DateTime, Duration, Utc};

pub const INITIAL_EASE: f64 = 2.5;
pub const MAX_EASE: f64 = 2.5;
pub const MIN_EASE: f64 = 1.3;

/// Interval in days at which a word counts as mastered.
pub const MASTERED_INTERVAL: u32 = 21;

/// Longest interval ever scheduled, in days. Stored intervals above it are clamped.
pub const MAX_INTERVAL: u32 = 36_500;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Review {
    pub ease_factor: f64,
    pub interval: u32,
    pub next_review: DateTime<Utc>,
}

/// SM-2 style step: correct answers grow the interval 0 -> 1 -> 6 -> interval * ease,
/// a miss resets it and lowers the ease.
pub fn next_review(correct: bool, ease_factor: f64, interval: u32, now: DateTime<Utc>) -> Review {
    let (ease_factor, interval) = if correct {
        let interval = match interval {
            0 => 1,
            1 => 6,
            n => (f64::from(n.min(MAX_INTERVAL)) * ease_factor).round() as u32,
        };
        let interval = interval.min(MAX_INTERVAL);
        ((ease_factor + 0.1).min(MAX_EASE), interval)
    } else {
        ((ease_factor - 0.2).max(MIN_EASE), 0)
    };

    Review {
        ease_factor,
        interval,
        next_review: now
            .checked_add_signed(Duration::days(i64::from(interval)))
            .unwrap_or(DateTime::<Utc>::MAX_UTC),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-03-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn first_correct_answer_schedules_tomorrow() {
        let r = next_review(true, INITIAL_EASE, 0, now());
        assert_eq!(r.interval, 1);
        assert_eq!(r.next_review, now() + Duration::days(1));
        assert_eq!(r.ease_factor, MAX_EASE);
    }

    #[test]
    fn second_correct_answer_jumps_to_six_days() {
        let r = next_review(true, 2.0, 1, now());
        assert_eq!(r.interval, 6);
        assert!((r.ease_factor - 2.1).abs() < 1e-9);
    }

    #[test]
    fn later_intervals_multiply_by_ease() {
        let r = next_review(true, 2.5, 6, now());
        assert_eq!(r.interval, 15);
    }

    #[test]
    fn miss_resets_interval_and_lowers_ease() {
        let r = next_review(false, 2.5, 15, now());
        assert_eq!(r.interval, 0);
        assert!((r.ease_factor - 2.3).abs() < 1e-9);
        assert_eq!(r.next_review, now());
    }

    #[test]
    fn ease_is_floored() {
        let r = next_review(false, 1.4, 6, now());
        assert_eq!(r.ease_factor, MIN_EASE);
    }

    #[test]
    fn huge_stored_interval_is_clamped() {
        let r = next_review(true, 2.5, 50_000_000, now());
        assert_eq!(r.interval, MAX_INTERVAL);
        assert_eq!(r.next_review, now() + Duration::days(i64::from(MAX_INTERVAL)));
    }

    #[test]
    fn date_overflow_saturates() {
        let r = next_review(true, 2.5, 6, DateTime::<Utc>::MAX_UTC);
        assert_eq!(r.next_review, DateTime::<Utc>::MAX_UTC);
    }
}
