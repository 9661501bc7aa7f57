//! Backtracking parser combinators over a shared parse context.
//!
//! Grammars are built from small parsers and combined with ordered choice,
//! sequencing, repetition and lookahead. All parsers share one
//! [`ParseContext`]: an immutable token slice, a cursor, and a stack of
//! result values. A parser reports only whether it matched; on success it
//! has advanced the cursor and possibly pushed values, on failure it has
//! left both exactly as they were.
//!
//! # Modules
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`primitives`] | `literal`, `string`, `predicate`, `range`, `one_of`, `any` |
//! | [`combinators`] | `alt`, `seq`, repetition, `optional`, lookahead, `label`, `Recursive` |
//! | [`projection`] | `map`, `map_last`, `replace`, `fold`, `join` |
//! | [`outcome`] | `run` and `parse_complete` |
//!
//! # Example
//!
//! ```text
//! let input = chars("ab");
//!
//! // First match wins: 'x' fails, 'a' matches and the cursor stops at 1.
//! let outcome = run::<_, String, _>(&alt((literal('x'), literal('a'))), &input);
//! assert_eq!(outcome.results, ["a"]);
//!
//! // 'a' matches but 'c' does not: the whole sequence rolls back to 0.
//! let outcome = run::<_, String, _>(&seq((literal('a'), literal('c'))), &input);
//! assert_eq!(outcome.position, 0);
//! ```
//!
//! Failures carry no control-flow meaning. The most recent one is kept on the
//! context for diagnostics and surfaces through [`ParseError`] when
//! [`parse_complete`] rejects an input.

pub mod combinators;
pub mod config;
pub mod context;
pub mod error;
pub mod outcome;
pub mod parser;
pub mod primitives;
pub mod projection;
pub mod snapshot;

pub use combinators::{
    alt, alt_discard, alt_list, at_least, discard, label, not, one_or_more, optional, peek,
    repeat, separated, seq, seq_discard, seq_list, zero_or_more, Alt, Discard, Label, Not,
    Optional, ParserList, ParserVec, Peek, Recursive, Repeat, RuleRef, Separated, Seq,
};
pub use config::{ParseConfig, DEFAULT_EPSILON, DEFAULT_MAX_DEPTH};
pub use context::ParseContext;
pub use error::{EngineError, FailureKind, GrammarError, ParseError, ParseFailure};
pub use outcome::{parse_complete, parse_complete_with, run, run_with, ParseOutcome, Progress};
pub use parser::{BoxedParser, FromTokens, Parser};
pub use primitives::{
    any, bytes, literal, literal_run, none_of, one_of, predicate, predicate_labelled, range,
    string, Any, Literal, LiteralRun, Predicate, Range, Set,
};
pub use projection::{fold, join, map, map_last, replace, Fold, Join, Map, MapLast, Replace};
pub use snapshot::Mark;

/// Split `text` into the `char` tokens the text grammars run over.
pub fn chars(text: &str) -> Vec<char> {
    text.chars().collect()
}
