//! The shared parse state threaded through every parser.
//!
//! A [`ParseContext`] owns everything that changes during a parse:
//!
//! - the cursor position into an immutable token slice
//! - the result stack that successful parsers push values onto
//! - the most recent failure, kept for diagnostics only
//! - the halt slot, set when an engine limit stops the parse
//!
//! Parsers themselves are stateless. Every parser that returns `false` must
//! leave the position and the result stack exactly as it found them; the
//! combinators in this crate restore a [`Mark`] whenever a partial match
//! fails, so hand-written parsers only need to uphold the contract for their
//! own direct mutations.

use tracing::warn;

use crate::config::ParseConfig;
use crate::error::{EngineError, ParseFailure};
use crate::snapshot::Mark;

/// Mutable state of a single parse over one input.
#[derive(Debug)]
pub struct ParseContext<'src, T, V> {
    input: &'src [T],
    pos: usize,
    results: Vec<V>,
    error: Option<ParseFailure>,
    halted: Option<EngineError>,
    config: ParseConfig,
    depth: usize,
}

impl<'src, T, V> ParseContext<'src, T, V> {
    /// Create a context at the start of `input` with default configuration.
    pub fn new(input: &'src [T]) -> Self {
        Self::with_config(input, ParseConfig::default())
    }

    /// Create a context at the start of `input`.
    pub fn with_config(input: &'src [T], config: ParseConfig) -> Self {
        ParseContext {
            input,
            pos: 0,
            results: Vec::new(),
            error: None,
            halted: None,
            config,
            depth: 0,
        }
    }

    // === Cursor ===

    /// The whole input.
    #[inline]
    pub fn input(&self) -> &'src [T] {
        self.input
    }

    /// Number of tokens in the input.
    #[inline]
    pub fn input_len(&self) -> usize {
        self.input.len()
    }

    /// Current cursor position.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns `true` once the cursor has reached the end of the input.
    #[inline]
    pub fn done(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Returns `true` if no parser may make progress: the input is
    /// exhausted or the engine has halted.
    #[inline]
    pub fn stopped(&self) -> bool {
        self.done() || self.halted.is_some()
    }

    /// Tokens from the cursor to the end of the input.
    #[inline]
    pub fn remaining(&self) -> &'src [T] {
        &self.input[self.pos.min(self.input.len())..]
    }

    /// The token under the cursor.
    #[inline]
    pub fn peek(&self) -> Option<&'src T> {
        self.input.get(self.pos)
    }

    /// The next `n` tokens, or `None` if fewer remain.
    #[inline]
    pub fn peek_n(&self, n: usize) -> Option<&'src [T]> {
        let end = self.pos.checked_add(n)?;
        self.input.get(self.pos..end)
    }

    /// Move the cursor forward by `n` tokens, stopping at the end of input.
    #[inline]
    pub fn advance(&mut self, n: usize) {
        debug_assert!(
            self.pos.saturating_add(n) <= self.input.len(),
            "advance by {} from {} passes end of input ({})",
            n,
            self.pos,
            self.input.len()
        );
        self.pos = self.pos.saturating_add(n).min(self.input.len());
    }

    // === Rollback ===

    /// Capture the current position and result-stack length.
    #[inline]
    pub fn mark(&self) -> Mark {
        Mark::new(self.pos, self.results.len())
    }

    /// Restore a previously captured mark.
    ///
    /// Truncates the result stack back to the marked length and moves the
    /// cursor back to the marked position.
    #[inline]
    pub fn reset(&mut self, mark: Mark) {
        debug_assert!(
            mark.position <= self.input.len(),
            "mark position {} out of bounds (max {})",
            mark.position,
            self.input.len()
        );
        self.pos = mark.position;
        self.results.truncate(mark.results_len);
    }

    /// Returns `true` if position or stack length differ from `mark`.
    #[inline]
    pub fn changed_since(&self, mark: Mark) -> bool {
        self.mark() != mark
    }

    // === Results ===

    #[inline]
    pub fn push(&mut self, value: V) {
        self.results.push(value);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<V> {
        self.results.pop()
    }

    /// Values pushed so far, oldest first.
    #[inline]
    pub fn results(&self) -> &[V] {
        &self.results
    }

    /// Remove and return every value pushed since `mark`.
    pub fn drain_from(&mut self, mark: Mark) -> Vec<V> {
        let from = mark.results_len.min(self.results.len());
        self.results.split_off(from)
    }

    /// Drop every value pushed since `mark`, keeping the cursor where it is.
    #[inline]
    pub fn truncate_results(&mut self, mark: Mark) {
        self.results.truncate(mark.results_len);
    }

    /// Consume the context, keeping only the result stack.
    pub fn into_results(self) -> Vec<V> {
        self.results
    }

    // === Diagnostics ===

    /// The most recently recorded failure.
    #[inline]
    pub fn error(&self) -> Option<&ParseFailure> {
        self.error.as_ref()
    }

    /// Record a failure, replacing any earlier one.
    #[inline]
    pub fn fail(&mut self, failure: ParseFailure) {
        self.error = Some(failure);
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Check the universal exhaustion guard.
    ///
    /// Returns `true` if the caller must fail without inspecting input. When
    /// the input is exhausted the failure is recorded for diagnostics.
    #[inline]
    pub fn guard_stopped(&mut self) -> bool {
        if self.halted.is_some() {
            return true;
        }
        if self.done() {
            self.fail(ParseFailure::exhausted(self.pos));
            return true;
        }
        false
    }

    // === Engine state ===

    /// The engine error that halted this parse, if any.
    #[inline]
    pub fn halted(&self) -> Option<&EngineError> {
        self.halted.as_ref()
    }

    /// Stop the parse. Every parser fails from here on.
    ///
    /// Only the first halt is kept.
    pub fn halt(&mut self, error: EngineError) {
        if self.halted.is_none() {
            warn!(position = self.pos, %error, "parse halted");
            self.halted = Some(error);
        }
    }

    #[inline]
    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    /// Compare two numbers with the configured tolerance.
    #[inline]
    pub fn approx_eq(&self, a: f64, b: f64) -> bool {
        self.config.approx_eq(a, b)
    }

    /// Current nesting of rule entries.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Enter a nested rule. Halts and returns `false` past the depth limit.
    pub(crate) fn enter_rule(&mut self) -> bool {
        if self.depth >= self.config.max_depth {
            self.halt(EngineError::RecursionLimit {
                limit: self.config.max_depth,
                position: self.pos,
            });
            return false;
        }
        self.depth += 1;
        true
    }

    pub(crate) fn exit_rule(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub(crate) fn into_parts(self) -> ContextParts<V> {
        ContextParts {
            position: self.pos,
            len: self.input.len(),
            results: self.results,
            error: self.error,
            halted: self.halted,
        }
    }
}

/// What remains of a context once its parse is over.
pub(crate) struct ContextParts<V> {
    pub(crate) position: usize,
    pub(crate) len: usize,
    pub(crate) results: Vec<V>,
    pub(crate) error: Option<ParseFailure>,
    pub(crate) halted: Option<EngineError>,
}
