//! A module for the positional polynomial digest and the target it is compared against.
//!
//! The digest starts from a seed of 7 and, for each character in order,
//! multiplies by 37 and adds the character's ordinal. Nothing is reduced
//! modulo anything, so the accumulator is an arbitrary-precision `Natural`
//! and longer candidates never wrap around.
//!
//! Because every ordinal is below the multiplier, the digest of a fixed
//! length is a base-37 numeral with the seed as its leading digit, which
//! is what makes [`decode_digest`] possible.

use super::*;
use malachite::base::num::arithmetic::traits::DivAssignRem;
use malachite::natural::Natural;
use std::fmt;
use std::str::FromStr;

/// Initial accumulator value.
pub const DIGEST_SEED: u32 = 7;

/// Per-character multiplier, also the hard cap on alphabet size.
pub const DIGEST_MULTIPLIER: u32 = 37;

/// Compute the digest of a candidate.
///
/// # Errors
/// Returns [`HashLearnError::InvalidCharacter`] for the first character that
/// is not in the alphabet.
pub fn compute_digest(alphabet: &Alphabet, candidate: &str) -> Result<Natural> {
    let multiplier = Natural::from(DIGEST_MULTIPLIER);
    let mut h = Natural::from(DIGEST_SEED);
    for (position, character) in candidate.chars().enumerate() {
        let ordinal = alphabet
            .ordinal(character)
            .ok_or(HashLearnError::InvalidCharacter {
                character,
                position,
            })?;
        h *= &multiplier;
        h += Natural::from(ordinal);
    }
    Ok(h)
}

/// Recover the unique candidate of `length` characters whose digest is
/// `digest`, if there is one.
#[must_use]
pub fn decode_digest(digest: &Natural, alphabet: &Alphabet, length: usize) -> Option<String> {
    let multiplier = Natural::from(DIGEST_MULTIPLIER);
    let mut n = digest.clone();
    let mut reversed = Vec::with_capacity(length);
    for _ in 0..length {
        let remainder = n.div_assign_rem(&multiplier);
        let ordinal = usize::try_from(&remainder).ok()?;
        reversed.push(alphabet.char_at(ordinal)?);
    }
    if n != Natural::from(DIGEST_SEED) {
        return None;
    }
    Some(reversed.into_iter().rev().collect())
}

/// The digest being searched for, kept alongside its decimal digits since
/// prefix learning works on the digit string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDigest {
    value: Natural,
    digits: String,
}

impl TargetDigest {
    #[must_use]
    pub fn new(value: Natural) -> Self {
        let digits = value.to_string();
        Self { value, digits }
    }

    #[must_use]
    pub fn value(&self) -> &Natural {
        &self.value
    }

    /// Decimal digits without leading zeros.
    #[must_use]
    pub fn digits(&self) -> &str {
        &self.digits
    }

    #[must_use]
    pub fn matches(&self, digest: &Natural) -> bool {
        &self.value == digest
    }
}

impl FromStr for TargetDigest {
    type Err = HashLearnError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(HashLearnError::InvalidTarget(s.to_string()));
        }
        let value =
            Natural::from_str(trimmed).map_err(|()| HashLearnError::InvalidTarget(s.to_string()))?;
        Ok(Self::new(value))
    }
}

impl From<u64> for TargetDigest {
    fn from(value: u64) -> Self {
        Self::new(Natural::from(value))
    }
}

impl fmt::Display for TargetDigest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.digits)
    }
}
