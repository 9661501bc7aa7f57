//! Running a parser over a whole input and reporting what happened.
//!
//! [`run`] reports everything the context knew when the parser returned.
//! [`parse_complete`] turns that report into a verdict, requiring the parser
//! to match and to consume the entire input:
//!
//! | Matched | Consumed all | Halted | `into_result()` |
//! |---------|--------------|--------|-----------------|
//! | any | any | yes | `Err(Engine(..))` |
//! | no | - | no | `Err(NoMatch { .. })` |
//! | yes | no | no | `Err(TrailingInput { .. })` |
//! | yes | yes | no | `Ok(results)` |

use tracing::debug;

use crate::config::ParseConfig;
use crate::context::ParseContext;
use crate::error::{EngineError, ParseError, ParseFailure};
use crate::parser::Parser;

/// Whether a parse consumed any input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    /// One or more tokens were consumed.
    Made,
    /// The cursor did not move.
    None,
}

impl Progress {
    pub fn made(self) -> bool {
        matches!(self, Progress::Made)
    }

    pub fn none(self) -> bool {
        matches!(self, Progress::None)
    }

    fn from_position(position: usize) -> Self {
        if position > 0 {
            Progress::Made
        } else {
            Progress::None
        }
    }
}

/// The state a top-level parse finished in.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseOutcome<V> {
    /// The parser's own verdict.
    pub matched: bool,
    /// Final cursor position.
    pub position: usize,
    /// Length of the input.
    pub len: usize,
    /// The result stack, oldest value first.
    pub results: Vec<V>,
    /// The last failure recorded during the parse.
    pub error: Option<ParseFailure>,
    /// Set when an engine limit stopped the parse.
    pub halted: Option<EngineError>,
}

impl<V> ParseOutcome<V> {
    pub fn progress(&self) -> Progress {
        Progress::from_position(self.position)
    }

    /// Matched and consumed the entire input without halting.
    pub fn is_complete(&self) -> bool {
        self.matched && self.halted.is_none() && self.position == self.len
    }

    /// The last value pushed, if the parse matched.
    pub fn value(&self) -> Option<&V> {
        if self.matched {
            self.results.last()
        } else {
            None
        }
    }

    /// Convert into the verdict reported by [`parse_complete`].
    ///
    /// A trailing-input error carries the recorded failure only when it was
    /// observed at or past the stop position; an earlier one belongs to an
    /// alternative that was abandoned and would point the reader backwards.
    pub fn into_result(self) -> Result<Vec<V>, ParseError> {
        if let Some(halt) = self.halted {
            return Err(ParseError::Engine(halt));
        }
        if !self.matched {
            let position = self.error.as_ref().map_or(self.position, |f| f.position);
            return Err(ParseError::NoMatch {
                position,
                failure: self.error,
            });
        }
        if self.position < self.len {
            let position = self.position;
            let failure = self.error.filter(|f| f.position >= position);
            return Err(ParseError::TrailingInput {
                position,
                len: self.len,
                failure,
            });
        }
        Ok(self.results)
    }
}

/// Run `parser` from the start of `input` with the default configuration.
pub fn run<T, V, P>(parser: &P, input: &[T]) -> ParseOutcome<V>
where
    P: Parser<T, V> + ?Sized,
{
    run_with(parser, input, ParseConfig::default())
}

/// Run `parser` from the start of `input`.
pub fn run_with<T, V, P>(parser: &P, input: &[T], config: ParseConfig) -> ParseOutcome<V>
where
    P: Parser<T, V> + ?Sized,
{
    debug!(len = input.len(), "parse: start");
    let mut ctx = ParseContext::with_config(input, config);
    let matched = parser.parse(&mut ctx) && ctx.halted().is_none();
    let parts = ctx.into_parts();
    debug!(
        matched,
        position = parts.position,
        values = parts.results.len(),
        halted = parts.halted.is_some(),
        "parse: end"
    );
    ParseOutcome {
        matched,
        position: parts.position,
        len: parts.len,
        results: parts.results,
        error: parts.error,
        halted: parts.halted,
    }
}

/// Run `parser` and require it to consume all of `input`.
pub fn parse_complete<T, V, P>(parser: &P, input: &[T]) -> Result<Vec<V>, ParseError>
where
    P: Parser<T, V> + ?Sized,
{
    run(parser, input).into_result()
}

/// [`parse_complete`] with an explicit configuration.
pub fn parse_complete_with<T, V, P>(
    parser: &P,
    input: &[T],
    config: ParseConfig,
) -> Result<Vec<V>, ParseError>
where
    P: Parser<T, V> + ?Sized,
{
    run_with(parser, input, config).into_result()
}
