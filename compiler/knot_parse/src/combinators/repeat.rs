//! Repetition.
//!
//! A repetition applies its child until the child fails, the maximum is
//! reached, or an iteration matches without consuming input. The last case
//! would otherwise loop forever; since the child can match the empty string,
//! any remaining minimum counts as met and the empty iteration's values are
//! dropped.
//!
//! At the end of input a repetition with no minimum succeeds at once. One
//! with a minimum still runs its child, so `one_or_more(optional(p))`
//! matches the empty string both at the end of input and before a token
//! `p` rejects.

use tracing::trace;

use crate::context::ParseContext;
use crate::error::{EngineError, GrammarError};
use crate::parser::Parser;
use crate::snapshot::Mark;

/// Repeats a parser between `min` and `max` times.
#[derive(Clone, Debug)]
pub struct Repeat<P> {
    parser: P,
    min: usize,
    max: Option<usize>,
}

/// Match `parser` any number of times. Always succeeds.
pub fn zero_or_more<P>(parser: P) -> Repeat<P> {
    at_least(parser, 0)
}

/// Match `parser` one or more times.
pub fn one_or_more<P>(parser: P) -> Repeat<P> {
    at_least(parser, 1)
}

/// Match `parser` at least `min` times.
pub fn at_least<P>(parser: P, min: usize) -> Repeat<P> {
    Repeat {
        parser,
        min,
        max: None,
    }
}

/// Match `parser` between `min` and `max` times (inclusive).
pub fn repeat<P>(parser: P, min: usize, max: usize) -> Result<Repeat<P>, GrammarError> {
    if min > max {
        return Err(GrammarError::InvalidRepeatBounds { min, max });
    }
    Ok(Repeat {
        parser,
        min,
        max: Some(max),
    })
}

/// Outcome of a single iteration.
enum Step {
    Matched,
    Stop,
    /// Matched without consuming input.
    Empty,
}

/// Run one iteration, undoing it unless it consumed input.
fn step<T, V, P: Parser<T, V>>(parser: &P, ctx: &mut ParseContext<'_, T, V>) -> Step {
    let before = ctx.mark();
    if !parser.parse(ctx) {
        ctx.reset(before);
        return Step::Stop;
    }
    if ctx.position() == before.position() {
        trace!(position = before.position(), "repeat: zero-width iteration");
        ctx.reset(before);
        return Step::Empty;
    }
    Step::Matched
}

/// Halt if `count` matched iterations exceed the configured limit.
fn over_limit<T, V>(ctx: &mut ParseContext<'_, T, V>, count: usize) -> bool {
    match ctx.config().max_repetitions {
        Some(limit) if count > limit => {
            let position = ctx.position();
            ctx.halt(EngineError::RepetitionLimit { limit, position });
            true
        }
        _ => false,
    }
}

/// Finish a repetition: undo everything if it fell short or the engine
/// halted.
fn finish<T, V>(ctx: &mut ParseContext<'_, T, V>, start: Mark, satisfied: bool) -> bool {
    if satisfied && ctx.halted().is_none() {
        return true;
    }
    ctx.reset(start);
    false
}

impl<P> Repeat<P> {
    fn below_max(&self, count: usize) -> bool {
        match self.max {
            Some(max) => count < max,
            None => true,
        }
    }
}

impl<T, V, P> Parser<T, V> for Repeat<P>
where
    P: Parser<T, V>,
{
    fn parse(&self, ctx: &mut ParseContext<'_, T, V>) -> bool {
        if ctx.halted().is_some() {
            return false;
        }
        if ctx.done() && self.min == 0 {
            return true;
        }
        let start = ctx.mark();
        let mut count = 0;
        let mut empty = false;
        while self.below_max(count) {
            match step(&self.parser, ctx) {
                Step::Matched => {
                    count += 1;
                    if over_limit(ctx, count) {
                        break;
                    }
                }
                Step::Stop => break,
                Step::Empty => {
                    empty = true;
                    break;
                }
            }
        }
        trace!(count, min = self.min, position = ctx.position(), "repeat: finished");
        finish(ctx, start, empty || count >= self.min)
    }
}

/// Matches `item (separator item)*`.
#[derive(Clone, Debug)]
pub struct Separated<P, S> {
    item: P,
    separator: S,
    min: usize,
}

/// Match at least `min` occurrences of `item` separated by `separator`.
///
/// A trailing separator is not consumed. Separator values stay on the
/// stack; wrap the separator in [`discard`](crate::discard) to drop them.
pub fn separated<P, S>(item: P, separator: S, min: usize) -> Separated<P, S> {
    Separated {
        item,
        separator,
        min,
    }
}

impl<T, V, P, S> Parser<T, V> for Separated<P, S>
where
    P: Parser<T, V>,
    S: Parser<T, V>,
{
    fn parse(&self, ctx: &mut ParseContext<'_, T, V>) -> bool {
        if ctx.halted().is_some() {
            return false;
        }
        if ctx.done() && self.min == 0 {
            return true;
        }
        let start = ctx.mark();
        if !self.item.parse(ctx) {
            return finish(ctx, start, self.min == 0);
        }
        let mut count = 1;
        loop {
            let before = ctx.mark();
            if !self.separator.parse(ctx) || !self.item.parse(ctx) {
                ctx.reset(before);
                break;
            }
            if ctx.position() == before.position() {
                ctx.reset(before);
                break;
            }
            count += 1;
            if over_limit(ctx, count) {
                break;
            }
        }
        finish(ctx, start, count >= self.min)
    }
}
