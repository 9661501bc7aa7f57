//! Single-child wrappers that adjust a parser's outcome or its values.
//!
//! These pass the exhaustion state through to their child instead of
//! short-circuiting on it: `optional(p)` at the end of input still succeeds,
//! and `discard(p)` fails exactly when `p` does. All of them fail once the
//! engine has halted.

use std::borrow::Cow;

use crate::context::ParseContext;
use crate::error::ParseFailure;
use crate::parser::Parser;

// === Optional ===

/// Succeeds whether or not its child matches.
#[derive(Clone, Debug)]
pub struct Optional<P> {
    parser: P,
}

/// Try `parser`; if it fails, succeed without consuming input or pushing.
pub fn optional<P>(parser: P) -> Optional<P> {
    Optional { parser }
}

impl<T, V, P> Parser<T, V> for Optional<P>
where
    P: Parser<T, V>,
{
    fn parse(&self, ctx: &mut ParseContext<'_, T, V>) -> bool {
        if ctx.halted().is_some() {
            return false;
        }
        let start = ctx.mark();
        if self.parser.parse(ctx) {
            return true;
        }
        ctx.reset(start);
        ctx.halted().is_none()
    }
}

// === Discard ===

/// Keeps its child's control-flow effect, drops its values.
#[derive(Clone, Debug)]
pub struct Discard<P> {
    parser: P,
}

/// Run `parser` for its match and advance only. Values it pushed are
/// removed, so the parsers above see none.
pub fn discard<P>(parser: P) -> Discard<P> {
    Discard { parser }
}

impl<T, V, P> Parser<T, V> for Discard<P>
where
    P: Parser<T, V>,
{
    fn parse(&self, ctx: &mut ParseContext<'_, T, V>) -> bool {
        let start = ctx.mark();
        if self.parser.parse(ctx) {
            ctx.truncate_results(start);
            true
        } else {
            false
        }
    }
}

// === Lookahead ===

/// Succeeds iff its child would, without consuming input.
#[derive(Clone, Debug)]
pub struct Peek<P> {
    parser: P,
}

/// Positive lookahead: test `parser` and restore the context either way.
pub fn peek<P>(parser: P) -> Peek<P> {
    Peek { parser }
}

impl<T, V, P> Parser<T, V> for Peek<P>
where
    P: Parser<T, V>,
{
    fn parse(&self, ctx: &mut ParseContext<'_, T, V>) -> bool {
        let start = ctx.mark();
        let matched = self.parser.parse(ctx);
        ctx.reset(start);
        matched
    }
}

/// Succeeds iff its child fails, without consuming input.
#[derive(Clone, Debug)]
pub struct Not<P> {
    parser: P,
}

/// Negative lookahead. `not(any())` matches only at the end of input.
pub fn not<P>(parser: P) -> Not<P> {
    Not { parser }
}

impl<T, V, P> Parser<T, V> for Not<P>
where
    P: Parser<T, V>,
{
    fn parse(&self, ctx: &mut ParseContext<'_, T, V>) -> bool {
        if ctx.halted().is_some() {
            return false;
        }
        let start = ctx.mark();
        let matched = self.parser.parse(ctx);
        ctx.reset(start);
        if matched {
            ctx.fail(ParseFailure::unexpected(start.position(), "match"));
        }
        !matched && ctx.halted().is_none()
    }
}

// === Label ===

/// Names a parser for diagnostics.
#[derive(Clone, Debug)]
pub struct Label<P> {
    parser: P,
    name: Cow<'static, str>,
}

/// On failure, record "expected `name`" at the position where `parser`
/// started. A failure the child recorded further into the input is kept,
/// since it points closer to the actual problem. Success and failure are
/// unchanged.
pub fn label<P>(parser: P, name: impl Into<Cow<'static, str>>) -> Label<P> {
    Label {
        parser,
        name: name.into(),
    }
}

impl<T, V, P> Parser<T, V> for Label<P>
where
    P: Parser<T, V>,
{
    fn parse(&self, ctx: &mut ParseContext<'_, T, V>) -> bool {
        let position = ctx.position();
        if self.parser.parse(ctx) {
            return true;
        }
        let deeper = ctx.error().is_some_and(|failure| failure.position > position);
        if ctx.halted().is_none() && !deeper {
            ctx.fail(ParseFailure::expected(position, self.name.clone()));
        }
        false
    }
}
