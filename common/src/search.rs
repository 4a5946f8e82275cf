//! The search loop: generate candidates, score them, and learn from misses.
//!
//! Each iteration keeps the confirmed prefix, randomizes the remaining
//! characters, and skips anything already tried without counting it. A
//! candidate whose digest equals the target ends the search. Anything else
//! is handed to the [`PrefixLearner`] so the next candidate starts from a
//! possibly longer prefix.
//!
//! The loop stops in one of two terminal states:
//!  1. `Found`, when a digest matches exactly.
//!  2. `Exhausted`, when the iteration bound is reached, or when every
//!     suffix under the current prefix has been tried. The second case
//!     happens once a wrong character has been confirmed (confirmations are
//!     never revised) or once the prefix covers the whole candidate.
//!
//! Status is reported through a [`SearchObserver`], which only ever receives
//! events and has no way to steer the search.

use super::*;
use log::{debug, info, trace, warn};
use malachite::natural::Natural;
use rand::Rng;
use serde::Serialize;
use std::collections::HashSet;

/// Everything a search needs that does not change while it runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    alphabet: Alphabet,
    target: TargetDigest,
    candidate_length: usize,
    max_iterations: u64,
}

impl SearchConfig {
    /// Create a config with the default iteration bound.
    ///
    /// # Errors
    /// Returns an error if the candidate length is zero.
    pub fn new(alphabet: Alphabet, target: TargetDigest, candidate_length: usize) -> Result<Self> {
        if candidate_length == 0 {
            return Err(HashLearnError::InvalidLength(candidate_length));
        }
        Ok(Self {
            alphabet,
            target,
            candidate_length,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        })
    }

    /// Build a config from an alphabet string and a decimal target.
    ///
    /// # Errors
    /// Returns an error if the alphabet, target or length is invalid.
    pub fn parse(letters: &str, target: &str, candidate_length: usize) -> Result<Self> {
        Self::new(Alphabet::new(letters)?, target.parse()?, candidate_length)
    }

    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u64) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    #[must_use]
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    #[must_use]
    pub fn target(&self) -> &TargetDigest {
        &self.target
    }

    #[must_use]
    pub fn candidate_length(&self) -> usize {
        self.candidate_length
    }

    #[must_use]
    pub fn max_iterations(&self) -> u64 {
        self.max_iterations
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStatus {
    Searching,
    Found,
    Exhausted,
}

/// Status updates emitted while a search runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    Started {
        target: String,
        candidate_length: usize,
    },
    /// Emitted on every multiple of [`PROGRESS_INTERVAL`] iterations.
    Progress { iterations: u64 },
    PrefixExtended { iterations: u64, prefix: String },
    Found {
        iterations: u64,
        candidate: String,
        digest: Natural,
    },
    BoundReached { iterations: u64 },
    /// Every suffix under `prefix` has been tried.
    SpaceExhausted { iterations: u64, prefix: String },
}

/// A write-only sink for [`SearchEvent`]s.
pub trait SearchObserver {
    fn on_event(&mut self, event: &SearchEvent);
}

impl<F: FnMut(&SearchEvent)> SearchObserver for F {
    fn on_event(&mut self, event: &SearchEvent) {
        self(event);
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl SearchObserver for NullObserver {
    fn on_event(&mut self, _event: &SearchEvent) {}
}

/// Forwards events to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl SearchObserver for LogObserver {
    fn on_event(&mut self, event: &SearchEvent) {
        match event {
            SearchEvent::Started {
                target,
                candidate_length,
            } => info!("Looking for a {candidate_length} character string matching {target}"),
            SearchEvent::Progress { iterations } => info!("Currently iterating at {iterations}"),
            SearchEvent::PrefixExtended { iterations, prefix } => {
                debug!("Prefix extended to {prefix:?} at iteration {iterations}");
            }
            SearchEvent::Found {
                iterations,
                candidate,
                digest,
            } => info!("Found {candidate} matching {digest} on attempt {iterations}"),
            SearchEvent::BoundReached { iterations } => {
                info!("Iteration bound reached at {iterations} without a match");
            }
            SearchEvent::SpaceExhausted { iterations, prefix } => {
                warn!(
                    "Every candidate under prefix {prefix:?} was tried by iteration {iterations}"
                );
            }
        }
    }
}

/// The matching candidate and its digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Solution {
    pub candidate: String,
    pub digest: String,
}

/// What is left of a search once it stops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchOutcome {
    pub status: SearchStatus,
    pub iterations: u64,
    pub duplicates_skipped: u64,
    pub prefix: String,
    pub solution: Option<Solution>,
    pub space_exhausted: bool,
}

/// Mutable state of a single search, owned by its [`Searcher`].
#[derive(Debug, Clone)]
pub struct SearchState {
    tried: HashSet<String>,
    iteration_count: u64,
    duplicates_skipped: u64,
    prefix: ConfirmedPrefix,
    // Tried candidates that start with the current prefix
    prefix_attempts: u64,
    status: SearchStatus,
    started: bool,
    solution: Option<Solution>,
    space_exhausted: bool,
}

impl SearchState {
    fn new() -> Self {
        Self {
            tried: HashSet::new(),
            iteration_count: 0,
            duplicates_skipped: 0,
            prefix: ConfirmedPrefix::new(),
            prefix_attempts: 0,
            status: SearchStatus::Searching,
            started: false,
            solution: None,
            space_exhausted: false,
        }
    }

    #[must_use]
    pub fn tried(&self) -> &HashSet<String> {
        &self.tried
    }

    #[must_use]
    pub fn iteration_count(&self) -> u64 {
        self.iteration_count
    }

    #[must_use]
    pub fn prefix(&self) -> &ConfirmedPrefix {
        &self.prefix
    }

    #[must_use]
    pub fn status(&self) -> SearchStatus {
        self.status
    }
}

/// Drives one search over a [`SearchConfig`].
#[derive(Debug, Clone)]
pub struct Searcher<'a> {
    config: &'a SearchConfig,
    learner: PrefixLearner,
    state: SearchState,
}

impl<'a> Searcher<'a> {
    #[must_use]
    pub fn new(config: &'a SearchConfig) -> Self {
        Self {
            config,
            learner: PrefixLearner::new(config.target.digits()),
            state: SearchState::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Run until the search reaches a terminal state.
    ///
    /// # Errors
    /// Returns an error if a generated candidate could not be digested, which
    /// means the alphabet and the generator disagree.
    pub fn run<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        observer: &mut dyn SearchObserver,
    ) -> Result<SearchOutcome> {
        while self.step(rng, observer)? == SearchStatus::Searching {}
        Ok(self.outcome())
    }

    /// Draw one candidate and evaluate it, unless it was already tried.
    /// Duplicates return `Searching` without advancing the iteration count.
    ///
    /// # Errors
    /// See [`Searcher::run`].
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        observer: &mut dyn SearchObserver,
    ) -> Result<SearchStatus> {
        if self.state.status != SearchStatus::Searching {
            return Ok(self.state.status);
        }
        if !self.state.started {
            self.state.started = true;
            observer.on_event(&SearchEvent::Started {
                target: self.config.target.digits().to_string(),
                candidate_length: self.config.candidate_length,
            });
        }
        if self.state.iteration_count >= self.config.max_iterations {
            return Ok(self.reach_bound(observer));
        }

        let suffix_length = self
            .config
            .candidate_length
            .saturating_sub(self.state.prefix.len());
        if let Some(space) = self.config.alphabet.space_size(suffix_length)
            && self.state.prefix_attempts >= space
        {
            return Ok(self.exhaust_space(observer));
        }

        let mut candidate = self.state.prefix.as_str().to_string();
        candidate.push_str(&self.config.alphabet.random_string(rng, suffix_length));
        if self.state.tried.contains(&candidate) {
            trace!("Skipping duplicate candidate {candidate}");
            self.state.duplicates_skipped += 1;
            return Ok(SearchStatus::Searching);
        }
        self.state.tried.insert(candidate.clone());
        self.state.prefix_attempts += 1;
        self.state.iteration_count += 1;

        let digest = compute_digest(&self.config.alphabet, &candidate)?;
        if self.config.target.matches(&digest) {
            self.state.status = SearchStatus::Found;
            self.state.solution = Some(Solution {
                candidate: candidate.clone(),
                digest: digest.to_string(),
            });
            observer.on_event(&SearchEvent::Found {
                iterations: self.state.iteration_count,
                candidate,
                digest,
            });
            return Ok(SearchStatus::Found);
        }

        let committed = self
            .learner
            .learn(&digest.to_string(), &candidate, &mut self.state.prefix);
        if committed > 0 {
            let prefix = self.state.prefix.as_str();
            self.state.prefix_attempts =
                self.state.tried.iter().filter(|t| t.starts_with(prefix)).count() as u64;
            observer.on_event(&SearchEvent::PrefixExtended {
                iterations: self.state.iteration_count,
                prefix: prefix.to_string(),
            });
        }

        if self.state.iteration_count % PROGRESS_INTERVAL == 0 {
            observer.on_event(&SearchEvent::Progress {
                iterations: self.state.iteration_count,
            });
        }
        if self.state.iteration_count >= self.config.max_iterations {
            return Ok(self.reach_bound(observer));
        }
        Ok(SearchStatus::Searching)
    }

    /// Snapshot of the current state as an outcome.
    #[must_use]
    pub fn outcome(&self) -> SearchOutcome {
        SearchOutcome {
            status: self.state.status,
            iterations: self.state.iteration_count,
            duplicates_skipped: self.state.duplicates_skipped,
            prefix: self.state.prefix.as_str().to_string(),
            solution: self.state.solution.clone(),
            space_exhausted: self.state.space_exhausted,
        }
    }

    fn reach_bound(&mut self, observer: &mut dyn SearchObserver) -> SearchStatus {
        self.state.status = SearchStatus::Exhausted;
        observer.on_event(&SearchEvent::BoundReached {
            iterations: self.state.iteration_count,
        });
        self.state.status
    }

    fn exhaust_space(&mut self, observer: &mut dyn SearchObserver) -> SearchStatus {
        self.state.status = SearchStatus::Exhausted;
        self.state.space_exhausted = true;
        observer.on_event(&SearchEvent::SpaceExhausted {
            iterations: self.state.iteration_count,
            prefix: self.state.prefix.as_str().to_string(),
        });
        self.state.status
    }
}

/// Run a complete search with a fresh state.
///
/// # Errors
/// See [`Searcher::run`].
pub fn run_search<R: Rng + ?Sized>(
    config: &SearchConfig,
    rng: &mut R,
    observer: &mut dyn SearchObserver,
) -> Result<SearchOutcome> {
    Searcher::new(config).run(rng, observer)
}
