//! A module with known puzzles for quick runs and offline benchmarking.

use super::*;
use clap::ValueEnum;
use std::fmt;

/// Puzzles with a known answer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// The eight character puzzle with target 25377615533200.
    Original,
    /// The seven character puzzle with target 680131659347.
    Short,
}

impl Preset {
    #[must_use]
    pub fn alphabet(self) -> &'static str {
        DEFAULT_ALPHABET
    }

    #[must_use]
    pub fn target(self) -> &'static str {
        match self {
            Preset::Original => DEFAULT_TARGET,
            Preset::Short => "680131659347",
        }
    }

    #[must_use]
    pub fn candidate_length(self) -> usize {
        match self {
            Preset::Original => DEFAULT_CANDIDATE_LENGTH,
            Preset::Short => 7,
        }
    }

    /// Build a search config for this puzzle.
    ///
    /// # Errors
    /// Only if the preset constants are malformed.
    pub fn config(self) -> Result<SearchConfig> {
        self.config_with(None, None, None)
    }

    /// Build a search config for this puzzle with some parts replaced.
    ///
    /// # Errors
    /// Returns an error if an override is invalid.
    pub fn config_with(
        self,
        alphabet: Option<&str>,
        target: Option<&str>,
        candidate_length: Option<usize>,
    ) -> Result<SearchConfig> {
        SearchConfig::parse(
            alphabet.unwrap_or(self.alphabet()),
            target.unwrap_or(self.target()),
            candidate_length.unwrap_or(self.candidate_length()),
        )
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{self:?}")
    }
}
