//! Comma-separated number lists.
//!
//! ```text
//! list   := ws (item (',' item)*)?
//! item   := ws number ws
//! number := '-'? digit+ ('.' digit+)?
//! ```
//!
//! An empty or blank input is an empty list. A trailing comma is not
//! allowed.

use knot_parse::{
    chars, discard, join, label, literal, one_of, one_or_more, optional, parse_complete_with,
    range, separated, seq, zero_or_more, GrammarError, ParseConfig, ParseError, Parser,
};
use thiserror::Error;

/// Why a list could not be read.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ListError {
    #[error(transparent)]
    Grammar(#[from] GrammarError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("`{0}` is not a number")]
    InvalidNumber(String),
}

/// Build the list grammar. Pushes the text of each number.
pub fn grammar() -> Result<impl Parser<char, String>, GrammarError> {
    let ws = || discard(zero_or_more(one_of([' ', '\t'])));
    let digits = || range('0', '9').map(one_or_more);

    let number = label(
        join(seq((
            optional(literal('-')),
            digits()?,
            optional(seq((literal('.'), digits()?))),
        ))),
        "number",
    );
    let item = seq((ws(), number, ws()));
    // `seq` fails outright on empty input; `optional` turns that into an
    // empty list
    Ok(optional(seq((ws(), separated(item, discard(literal(',')), 0)))))
}

/// Read every number in `source`.
pub fn parse(source: &str, config: ParseConfig) -> Result<Vec<f64>, ListError> {
    let grammar = grammar()?;
    parse_complete_with(&grammar, &chars(source), config)?
        .into_iter()
        .map(|text| text.parse().map_err(|_| ListError::InvalidNumber(text)))
        .collect()
}

#[cfg(test)]
mod tests;
