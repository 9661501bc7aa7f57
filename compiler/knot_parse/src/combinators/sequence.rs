//! Sequencing.

use tracing::trace;

use super::{discard, Discard, ParserList, ParserVec};
use crate::context::ParseContext;
use crate::error::GrammarError;
use crate::parser::{BoxedParser, Parser};

/// Runs parsers one after another; all must match.
#[derive(Clone, Debug)]
pub struct Seq<L> {
    parsers: L,
}

/// Sequence over a tuple of parsers.
///
/// Each child starts where the previous one stopped. The values of all
/// children stay on the result stack in order. If any child fails, the
/// whole sequence is undone back to where the first child started.
pub fn seq<L>(parsers: L) -> Seq<L> {
    Seq { parsers }
}

/// Sequence over a runtime-sized list.
pub fn seq_list<'a, T, V>(
    parsers: Vec<BoxedParser<'a, T, V>>,
) -> Result<Seq<ParserVec<'a, T, V>>, GrammarError> {
    let parsers = ParserVec::new(parsers).ok_or(GrammarError::EmptySequence)?;
    Ok(Seq { parsers })
}

/// Sequence whose match leaves no values behind.
pub fn seq_discard<L>(parsers: L) -> Discard<Seq<L>> {
    discard(seq(parsers))
}

impl<T, V, L> Parser<T, V> for Seq<L>
where
    L: ParserList<T, V>,
{
    fn parse(&self, ctx: &mut ParseContext<'_, T, V>) -> bool {
        if ctx.stopped() {
            return false;
        }
        let start = ctx.mark();
        for index in 0..self.parsers.count() {
            if !self.parsers.parse_nth(index, ctx) {
                if ctx.changed_since(start) {
                    trace!(index, from = ctx.position(), to = start.position(), "seq: rolling back");
                    ctx.reset(start);
                }
                return false;
            }
        }
        true
    }
}
