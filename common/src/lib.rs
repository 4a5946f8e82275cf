//! A library for adaptive brute-force preimage search over a small alphabet.
//!
//! Candidates are fixed-length strings drawn from an ordered alphabet and
//! scored by a positional polynomial digest. Failed attempts are not thrown
//! away: when the leading digits of a failed digest agree with the target's,
//! the matching character of the attempt is locked into a confirmed prefix
//! and every later attempt only randomizes what remains.

pub mod alphabet;
pub mod digest;
pub mod prefix_learner;
pub mod presets;
pub mod run_stats;
pub mod search;

pub use alphabet::Alphabet;
pub use digest::{TargetDigest, compute_digest};
pub use prefix_learner::{ConfirmedPrefix, PrefixLearner};
pub use search::{
    LogObserver, NullObserver, SearchConfig, SearchEvent, SearchObserver, SearchOutcome,
    SearchStatus, Solution, run_search,
};

use thiserror::Error;

pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The alphabet of the original puzzle, ordinals 0 through 15.
pub const DEFAULT_ALPHABET: &str = "acdegilmnoprstuw";

/// The digest of the original puzzle's eight character answer.
pub const DEFAULT_TARGET: &str = "25377615533200";

pub const DEFAULT_CANDIDATE_LENGTH: usize = 8;

/// Unique attempts allowed before a search gives up.
pub const DEFAULT_MAX_ITERATIONS: u64 = 5_000;

/// Progress events are emitted on multiples of this many iterations.
pub const PROGRESS_INTERVAL: u64 = 1_000;

/// Everything that can go wrong while configuring or running a search.
/// An unsuccessful search is not an error, see [`SearchStatus::Exhausted`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashLearnError {
    /// A character outside the alphabet reached the digest function.
    #[error("character {character:?} at position {position} is not in the alphabet")]
    InvalidCharacter { character: char, position: usize },

    #[error("alphabet must contain at least one character")]
    EmptyAlphabet,

    #[error("alphabet contains {0:?} more than once")]
    DuplicateCharacter(char),

    /// Ordinals must stay below the digest multiplier or distinct
    /// candidates could collide.
    #[error("alphabet has {size} characters but at most {max} are supported")]
    AlphabetTooLarge { size: usize, max: usize },

    #[error("target digest {0:?} is not a non-negative decimal integer")]
    InvalidTarget(String),

    #[error("candidate length must be at least 1, got {0}")]
    InvalidLength(usize),
}

pub type Result<T> = std::result::Result<T, HashLearnError>;
