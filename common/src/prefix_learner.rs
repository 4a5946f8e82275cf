//! A module that mines failed attempts for confirmed prefix characters.
//!
//! Leading digits of the digest are dominated by the leading characters of
//! the candidate, so a failed attempt whose digest starts out like the
//! target's probably has its leading characters right. At match offset `m`
//! we compare three windows that start at `m` and are `m + 1`, `m + 2` and
//! `m + 3` digits wide between the failed digest and the target. If all
//! three agree, the candidate's
//! character at `m` is appended to the confirmed prefix and `m + 1` is
//! checked next.
//!
//! Requiring three growing windows instead of a single digit filters out
//! most coincidences, but it is still a heuristic: a committed character is
//! never revised, even if it later turns out to be wrong.

use log::debug;

/// Extra width of each confirmation window beyond the match offset.
pub const CONFIRMATION_WINDOWS: [usize; 3] = [1, 2, 3];

/// The characters locked in so far and the digit offset learning resumes from.
///
/// Both only ever grow, and they grow together, so `match_offset` always
/// equals the number of confirmed characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfirmedPrefix {
    chars: String,
    match_offset: usize,
}

impl ConfirmedPrefix {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.chars
    }

    /// Number of confirmed characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.match_offset
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.match_offset == 0
    }

    #[must_use]
    pub fn match_offset(&self) -> usize {
        self.match_offset
    }

    fn commit(&mut self, c: char) {
        self.chars.push(c);
        self.match_offset += 1;
    }
}

/// Whether another offset may be examined for a digest with this many digits.
/// Keeps the widest window, `offset..2 * offset + 3`, inside the digit string.
#[must_use]
pub fn can_examine(match_offset: usize, digest_len: usize) -> bool {
    match_offset * 2 + 3 < digest_len
}

/// Compare the confirmation windows of two digit strings at `offset`, each
/// starting at `offset` and `offset + 1`, `offset + 2`, `offset + 3` wide.
/// A window running past the end of either string counts as a mismatch.
#[must_use]
pub fn windows_agree(digest_digits: &str, target_digits: &str, offset: usize) -> bool {
    CONFIRMATION_WINDOWS.iter().all(|&width| {
        let window = offset..2 * offset + width;
        match (digest_digits.get(window.clone()), target_digits.get(window)) {
            (Some(ours), Some(theirs)) => ours == theirs,
            _ => false,
        }
    })
}

/// Promotes characters of failed attempts into a [`ConfirmedPrefix`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixLearner {
    target_digits: String,
}

impl PrefixLearner {
    #[must_use]
    pub fn new(target_digits: impl Into<String>) -> Self {
        Self {
            target_digits: target_digits.into(),
        }
    }

    /// Run one learning pass over a failed attempt, committing characters for
    /// as long as the windows keep agreeing. Returns how many were committed.
    pub fn learn(
        &self,
        digest_digits: &str,
        candidate: &str,
        prefix: &mut ConfirmedPrefix,
    ) -> usize {
        let mut committed = 0;
        while can_examine(prefix.match_offset, digest_digits.len()) {
            if !windows_agree(digest_digits, &self.target_digits, prefix.match_offset) {
                break;
            }
            let Some(c) = candidate.chars().nth(prefix.match_offset) else {
                break;
            };
            prefix.commit(c);
            committed += 1;
            debug!(
                "Confirmed {c:?} at offset {} from {candidate} ({digest_digits}), prefix is now {:?}",
                prefix.match_offset - 1,
                prefix.as_str()
            );
        }
        committed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Alphabet, DEFAULT_ALPHABET, DEFAULT_TARGET, compute_digest};

    fn learner() -> PrefixLearner {
        PrefixLearner::new(DEFAULT_TARGET)
    }

    #[test_log::test]
    fn test_windows_agree() {
        assert!(windows_agree("25377699999999", DEFAULT_TARGET, 0));
        // "53", "537", "5377"
        assert!(windows_agree("25377699999999", DEFAULT_TARGET, 1));
        // "37769" vs "37761"
        assert!(!windows_agree("25377699999999", DEFAULT_TARGET, 2));
        // "7769" vs "7761"
        assert!(!windows_agree("25377699999999", DEFAULT_TARGET, 3));
        // Single digit agrees but the wider windows do not
        assert!(!windows_agree("29999999999999", DEFAULT_TARGET, 0));
        // Windows widen with the offset: digits 1..3 agree, 1..5 do not
        assert!(!windows_agree("25379999999999", DEFAULT_TARGET, 1));
    }

    #[test_log::test]
    fn test_windows_past_the_end_disagree() {
        assert!(!windows_agree("25", "253", 0));
        assert!(!windows_agree("253", "25", 0));
        assert!(windows_agree("253", "253", 0));
        // Offset 1 needs digits 1..5
        assert!(!windows_agree("2537", "2537", 1));
        assert!(windows_agree("25377", "25377", 1));
    }

    #[test_log::test]
    fn test_can_examine_bound() {
        // 14 digits: offsets 0 through 5
        assert!(can_examine(0, 14));
        assert!(can_examine(5, 14));
        assert!(!can_examine(6, 14));
        assert!(!can_examine(0, 3));
        assert!(can_examine(0, 4));
    }

    #[test_log::test]
    fn test_fabricated_digest_commits_two() {
        // Offset 0 agrees on "2", "25", "253" and offset 1 on "53", "537",
        // "5377"; offset 2 compares "37769" against "37761" and stops.
        let mut prefix = ConfirmedPrefix::new();
        let committed = learner().learn("25377699999999", "nsanswer", &mut prefix);
        assert_eq!(committed, 2);
        assert_eq!(prefix.as_str(), "ns");
        assert_eq!(prefix.match_offset(), 2);
    }

    #[test_log::test]
    fn test_no_agreement_commits_nothing() {
        let mut prefix = ConfirmedPrefix::new();
        assert_eq!(
            learner().learn("24999999999999", "wwwwwwww", &mut prefix),
            0
        );
        assert!(prefix.is_empty());
        assert_eq!(prefix.as_str(), "");
    }

    #[test_log::test]
    fn test_stops_at_bound() {
        // Every window agrees, only the bound ends the pass. Offset 5 reads
        // digits 5..13 of 14, offset 6 would need 6..15.
        let mut prefix = ConfirmedPrefix::new();
        let committed = learner().learn(DEFAULT_TARGET, "nsanswer", &mut prefix);
        assert_eq!(committed, 6);
        assert_eq!(prefix.as_str(), "nsansw");
        assert!(!can_examine(prefix.match_offset(), DEFAULT_TARGET.len()));

        // Another pass cannot move past the bound either
        assert_eq!(learner().learn(DEFAULT_TARGET, "nsanswer", &mut prefix), 0);
        assert_eq!(prefix.len(), 6);
    }

    #[test_log::test]
    fn test_short_digests_are_ignored() {
        let mut prefix = ConfirmedPrefix::new();
        assert_eq!(learner().learn("253", "nsanswer", &mut prefix), 0);
        assert_eq!(learner().learn("", "nsanswer", &mut prefix), 0);
        assert!(prefix.is_empty());
    }

    #[test_log::test]
    fn test_resumes_from_match_offset() {
        let mut prefix = ConfirmedPrefix::new();
        learner().learn("25399999999999", "nsaaaaaa", &mut prefix);
        assert_eq!(prefix.as_str(), "n");

        // A later attempt shares the prefix and agrees two offsets further
        let committed = learner().learn("25377615999999", "nswwwwww", &mut prefix);
        assert_eq!(committed, 2);
        assert_eq!(prefix.as_str(), "nsw");
    }

    #[test_log::test]
    fn test_candidate_shorter_than_offset() {
        let mut prefix = ConfirmedPrefix::new();
        let committed = learner().learn(DEFAULT_TARGET, "ns", &mut prefix);
        assert_eq!(committed, 2);
        assert_eq!(prefix.as_str(), "ns");
    }

    #[test_log::test]
    fn test_promoted_attempt_agrees_with_target() {
        // For real digests, whatever attempt caused a promotion must share
        // the target's digits on every confirmed offset.
        let alphabet = Alphabet::new(DEFAULT_ALPHABET).unwrap();
        let learner = learner();
        for candidate in ["nsanswer", "nsanaaaa", "nsaaaaaa", "nrwwwwww", "aaaaaaaa"] {
            let digest_digits = compute_digest(&alphabet, candidate).unwrap().to_string();
            let mut prefix = ConfirmedPrefix::new();
            learner.learn(&digest_digits, candidate, &mut prefix);
            assert_eq!(
                &digest_digits[..prefix.match_offset()],
                &DEFAULT_TARGET[..prefix.match_offset()]
            );
            assert!(candidate.starts_with(prefix.as_str()));
        }
    }

    #[test_log::test]
    fn test_confirmed_prefix_pins_leading_digits() {
        // Whatever suffix follows a confirmed prefix, from the smallest to the
        // largest, the digest keeps the target's digits before the offset.
        let alphabet = Alphabet::new(DEFAULT_ALPHABET).unwrap();
        let mut prefix = ConfirmedPrefix::new();
        learner().learn(DEFAULT_TARGET, "nsanswer", &mut prefix);
        assert_eq!(prefix.as_str(), "nsansw");

        for confirmed in 1..=prefix.len() {
            let head = &prefix.as_str()[..confirmed];
            for filler in ["a", "w"] {
                let candidate = format!("{head}{}", filler.repeat(8 - confirmed));
                let digits = compute_digest(&alphabet, &candidate).unwrap().to_string();
                assert_eq!(
                    &digits[..confirmed],
                    &DEFAULT_TARGET[..confirmed],
                    "{candidate} -> {digits}"
                );
            }
        }
    }
}
