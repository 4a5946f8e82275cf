//! A module mapping alphabet characters to and from their ordinal positions.

use super::*;
use crate::digest::DIGEST_MULTIPLIER;
use rand::Rng;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// An ordered set of characters. A character's index in the ordering is the
/// value it contributes to a digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    chars: Vec<char>,
    ordinals: HashMap<char, u32>,
}

impl Alphabet {
    /// Build an alphabet from its characters in order.
    ///
    /// # Errors
    /// Returns an error if the alphabet is empty, repeats a character, or has
    /// more characters than the digest multiplier can keep apart.
    pub fn new(letters: &str) -> Result<Self> {
        let chars: Vec<char> = letters.chars().collect();
        if chars.is_empty() {
            return Err(HashLearnError::EmptyAlphabet);
        }
        let max = DIGEST_MULTIPLIER as usize;
        if chars.len() > max {
            return Err(HashLearnError::AlphabetTooLarge {
                size: chars.len(),
                max,
            });
        }

        let mut ordinals = HashMap::with_capacity(chars.len());
        for (ordinal, &c) in chars.iter().enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            let ordinal = ordinal as u32;
            if ordinals.insert(c, ordinal).is_some() {
                return Err(HashLearnError::DuplicateCharacter(c));
            }
        }

        Ok(Self { chars, ordinals })
    }

    /// Zero-based position of a character, or `None` if it is not a member.
    #[must_use]
    pub fn ordinal(&self, c: char) -> Option<u32> {
        self.ordinals.get(&c).copied()
    }

    /// The character at an ordinal position.
    #[must_use]
    pub fn char_at(&self, ordinal: usize) -> Option<char> {
        self.chars.get(ordinal).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always false, construction rejects empty alphabets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    #[must_use]
    pub fn contains(&self, c: char) -> bool {
        self.ordinals.contains_key(&c)
    }

    /// Draw `length` characters uniformly at random.
    pub fn random_string<R: Rng + ?Sized>(&self, rng: &mut R, length: usize) -> String {
        (0..length)
            .map(|_| self.chars[rng.random_range(0..self.chars.len())])
            .collect()
    }

    /// How many distinct strings of `length` characters exist, or `None` if
    /// the count does not fit in a u64.
    #[must_use]
    pub fn space_size(&self, length: usize) -> Option<u64> {
        let exponent = u32::try_from(length).ok()?;
        (self.chars.len() as u64).checked_pow(exponent)
    }
}

impl FromStr for Alphabet {
    type Err = HashLearnError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for c in &self.chars {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}
