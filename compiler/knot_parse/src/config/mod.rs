//! Per-parse configuration.
//!
//! Everything a grammar might want to tune lives here and travels with the
//! context, so no parse depends on process-wide mutable state.

/// Default bound on nested rule entries.
pub const DEFAULT_MAX_DEPTH: usize = 4096;

/// Default tolerance for approximate numeric comparison in grammar actions.
pub const DEFAULT_EPSILON: f64 = 1e-6;

/// Limits and tolerances applied to a single parse.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParseConfig {
    /// Iterations a single repetition may perform before the parse halts.
    /// `None` leaves repetitions bounded only by the input.
    pub max_repetitions: Option<usize>,
    /// Nested [`Recursive`](crate::Recursive) entries allowed before the
    /// parse halts. Left-recursive grammars hit this instead of looping.
    pub max_depth: usize,
    /// Tolerance used by [`ParseConfig::approx_eq`].
    pub epsilon: f64,
}

impl Default for ParseConfig {
    fn default() -> Self {
        ParseConfig {
            max_repetitions: None,
            max_depth: DEFAULT_MAX_DEPTH,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl ParseConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_repetitions(mut self, limit: usize) -> Self {
        self.max_repetitions = Some(limit);
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    #[must_use]
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon.abs();
        self
    }

    /// Checks if `|a - b| <= epsilon`.
    pub fn approx_eq(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.epsilon
    }
}
