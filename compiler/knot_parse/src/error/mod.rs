//! Failure and error types.
//!
//! Three layers, kept apart so callers can tell them apart:
//!
//! | Type | When | Effect on control flow |
//! |------|------|------------------------|
//! | [`ParseFailure`] | a primitive or label did not match | none; diagnostics only |
//! | [`GrammarError`] | a combinator was built from invalid parts | construction fails |
//! | [`EngineError`] | a runtime limit or misuse stopped the engine | the parse halts |
//!
//! [`ParseError`] is what the top-level invocation reports once a parse is over.

use std::fmt;
use thiserror::Error;

/// Why a primitive (or a labelled parser) failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// Something specific was expected at the position.
    Expected(String),
    /// The token at the position is not allowed here.
    Unexpected(String),
    /// The input ended where more tokens were required.
    Exhausted,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Expected(what) => write!(f, "expected {what}"),
            FailureKind::Unexpected(what) => write!(f, "unexpected {what}"),
            FailureKind::Exhausted => write!(f, "unexpected end of input"),
        }
    }
}

/// The most recent failure recorded in a parse context.
///
/// Overwritten by every later failure; never consulted for control flow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseFailure {
    /// Input position at which the failure was observed.
    pub position: usize,
    /// What went wrong.
    pub kind: FailureKind,
}

impl ParseFailure {
    pub fn expected(position: usize, what: impl Into<String>) -> Self {
        ParseFailure {
            position,
            kind: FailureKind::Expected(what.into()),
        }
    }

    pub fn unexpected(position: usize, what: impl Into<String>) -> Self {
        ParseFailure {
            position,
            kind: FailureKind::Unexpected(what.into()),
        }
    }

    pub fn exhausted(position: usize) -> Self {
        ParseFailure {
            position,
            kind: FailureKind::Exhausted,
        }
    }
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at position {}", self.kind, self.position)
    }
}

/// A grammar that cannot be built.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("alternative list is empty")]
    EmptyAlternatives,
    #[error("sequence is empty")]
    EmptySequence,
    #[error("literal run is empty")]
    EmptyLiteral,
    #[error("range start {start} is greater than range end {end}")]
    InvertedRange { start: String, end: String },
    #[error("repetition minimum {min} exceeds maximum {max}")]
    InvalidRepeatBounds { min: usize, max: usize },
    #[error("rule `{name}` is already defined")]
    RuleRedefined { name: String },
}

/// The engine stopped a parse for a reason other than a grammar mismatch.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("repetition exceeded {limit} iterations at position {position}")]
    RepetitionLimit { limit: usize, position: usize },
    #[error("rule nesting exceeded depth {limit} at position {position}")]
    RecursionLimit { limit: usize, position: usize },
    #[error("rule `{name}` was invoked before it was defined")]
    UndefinedRule { name: String },
}

/// Final verdict of a parse that was required to consume all input.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The grammar did not match the input.
    #[error("no match at position {position}")]
    NoMatch {
        position: usize,
        failure: Option<ParseFailure>,
    },
    /// The grammar matched a prefix; the rest of the input was left over.
    #[error("unconsumed input at position {position} of {len}")]
    TrailingInput {
        position: usize,
        len: usize,
        failure: Option<ParseFailure>,
    },
    /// The engine halted the parse.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl ParseError {
    /// Position to point a diagnostic at.
    pub fn position(&self) -> usize {
        match self {
            ParseError::NoMatch { position, .. } | ParseError::TrailingInput { position, .. } => {
                *position
            }
            ParseError::Engine(
                EngineError::RepetitionLimit { position, .. }
                | EngineError::RecursionLimit { position, .. },
            ) => *position,
            ParseError::Engine(EngineError::UndefinedRule { .. }) => 0,
        }
    }

    /// The recorded failure that best explains this error, if any.
    pub fn failure(&self) -> Option<&ParseFailure> {
        match self {
            ParseError::NoMatch { failure, .. } | ParseError::TrailingInput { failure, .. } => {
                failure.as_ref()
            }
            ParseError::Engine(_) => None,
        }
    }

    /// Returns `true` if the engine, not the grammar, ended the parse.
    pub fn is_engine_error(&self) -> bool {
        matches!(self, ParseError::Engine(_))
    }
}
