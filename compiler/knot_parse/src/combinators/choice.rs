//! Ordered choice.

use tracing::trace;

use super::{discard, Discard, ParserList, ParserVec};
use crate::context::ParseContext;
use crate::error::GrammarError;
use crate::parser::{BoxedParser, Parser};

/// Tries alternatives in order; the first to match wins.
#[derive(Clone, Debug)]
pub struct Alt<L> {
    parsers: L,
}

/// Ordered choice over a tuple of parsers.
///
/// Each alternative starts from the same position. The first one that
/// matches decides the outcome and its effects are kept as they are; later
/// alternatives are never tried, even if they would match more input. If
/// every alternative fails, the context is left exactly as it was.
pub fn alt<L>(parsers: L) -> Alt<L> {
    Alt { parsers }
}

/// Ordered choice over a runtime-sized list.
pub fn alt_list<'a, T, V>(
    parsers: Vec<BoxedParser<'a, T, V>>,
) -> Result<Alt<ParserVec<'a, T, V>>, GrammarError> {
    let parsers = ParserVec::new(parsers).ok_or(GrammarError::EmptyAlternatives)?;
    Ok(Alt { parsers })
}

/// Ordered choice whose match leaves no values behind.
pub fn alt_discard<L>(parsers: L) -> Discard<Alt<L>> {
    discard(alt(parsers))
}

impl<T, V, L> Parser<T, V> for Alt<L>
where
    L: ParserList<T, V>,
{
    fn parse(&self, ctx: &mut ParseContext<'_, T, V>) -> bool {
        if ctx.stopped() {
            return false;
        }
        let start = ctx.mark();
        for index in 0..self.parsers.count() {
            if self.parsers.parse_nth(index, ctx) {
                trace!(index, position = ctx.position(), "alt: alternative matched");
                return true;
            }
            if ctx.changed_since(start) {
                // A hand-written alternative broke the rollback contract.
                trace!(index, "alt: discarding residue of failed alternative");
                ctx.reset(start);
            }
            if ctx.halted().is_some() {
                return false;
            }
        }
        false
    }
}
