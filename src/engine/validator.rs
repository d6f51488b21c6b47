/// Outcome of checking an accumulated input value against an expected string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// The value is a prefix of the expected string. `complete` when it is the
    /// whole string.
    Prefix { complete: bool },
    /// First divergence. `valid` is the expected string truncated to `index`
    /// code points.
    Mismatch {
        index: usize,
        found: char,
        valid: String,
    },
}

/// Compare `value` with `expected` code point by code point.
///
/// A value longer than the expected string diverges at `expected.len()`, where
/// the extra character counts as the offending one.
pub fn check(expected: &str, value: &str) -> Verdict {
    let mut expected_chars = expected.chars();
    for (index, found) in value.chars().enumerate() {
        match expected_chars.next() {
            Some(want) if want == found => {}
            _ => {
                return Verdict::Mismatch {
                    index,
                    found,
                    valid: expected.chars().take(index).collect(),
                };
            }
        }
    }
    Verdict::Prefix {
        complete: expected_chars.next().is_none(),
    }
}

/// Expected string truncated to the code point length of `value`.
pub fn expected_prefix<'a>(expected: &'a str, value: &str) -> &'a str {
    let len = value.chars().count();
    match expected.char_indices().nth(len) {
        Some((byte, _)) => &expected[..byte],
        None => expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_value_is_incomplete_prefix() {
        assert_eq!(check("die", ""), Verdict::Prefix { complete: false });
    }

    #[test]
    fn empty_expected_is_complete() {
        assert_eq!(check("", ""), Verdict::Prefix { complete: true });
    }

    #[test]
    fn full_match_is_complete() {
        assert_eq!(check("hören", "hören"), Verdict::Prefix { complete: true });
    }

    #[test]
    fn mismatch_locates_first_divergence() {
        assert_eq!(
            check("hören", "höx"),
            Verdict::Mismatch {
                index: 2,
                found: 'x',
                valid: "hö".to_string()
            }
        );
    }

    #[test]
    fn mismatch_at_start_keeps_nothing() {
        assert_eq!(
            check("hörst", "d"),
            Verdict::Mismatch {
                index: 0,
                found: 'd',
                valid: String::new()
            }
        );
    }

    #[test]
    fn overlong_value_diverges_after_expected() {
        assert_eq!(
            check("die", "die "),
            Verdict::Mismatch {
                index: 3,
                found: ' ',
                valid: "die".to_string()
            }
        );
    }

    #[test]
    fn reports_first_of_several_errors() {
        match check("Mutter", "Mxtyer") {
            Verdict::Mismatch { index, found, .. } => {
                assert_eq!(index, 1);
                assert_eq!(found, 'x');
            }
            other => panic!("expected mismatch, got {other:?}"),
        }
    }

    #[test]
    fn expected_prefix_counts_code_points() {
        assert_eq!(expected_prefix("Mütter", "Mü"), "Mü");
        assert_eq!(expected_prefix("die", "die "), "die");
        assert_eq!(expected_prefix("hören", ""), "");
    }
}
