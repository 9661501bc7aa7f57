//! Leaf parsers that test tokens at the cursor.
//!
//! Every primitive follows the same contract:
//!
//! 1. If the context is stopped (input exhausted or engine halted), fail
//!    without inspecting input.
//! 2. Test the token(s) at the cursor.
//! 3. On a match advance past them and push the matched value via
//!    [`FromTokens`]; otherwise record a failure and leave the context as is.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

use crate::context::ParseContext;
use crate::error::{GrammarError, ParseFailure};
use crate::parser::{FromTokens, Parser};

/// Match and push one token.
#[inline]
fn accept<T, V: FromTokens<T>>(ctx: &mut ParseContext<'_, T, V>, token: &T) -> bool {
    ctx.advance(1);
    ctx.push(V::from_token(token));
    true
}

// === Literal ===

/// Matches a single token equal to the target.
#[derive(Clone, Debug)]
pub struct Literal<T> {
    token: T,
}

/// Match exactly `token`.
pub fn literal<T>(token: T) -> Literal<T> {
    Literal { token }
}

impl<T, V> Parser<T, V> for Literal<T>
where
    T: PartialEq + fmt::Debug,
    V: FromTokens<T>,
{
    fn parse(&self, ctx: &mut ParseContext<'_, T, V>) -> bool {
        if ctx.guard_stopped() {
            return false;
        }
        match ctx.peek() {
            Some(token) if *token == self.token => accept(ctx, token),
            _ => {
                ctx.fail(ParseFailure::expected(
                    ctx.position(),
                    format!("{:?}", self.token),
                ));
                false
            }
        }
    }
}

// === Literal run ===

/// Matches a fixed run of tokens.
#[derive(Clone, Debug)]
pub struct LiteralRun<T> {
    tokens: Vec<T>,
    expected: String,
}

impl<T> LiteralRun<T> {
    /// Number of tokens the run consumes.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Always `false`; empty runs are rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Match the exact run `tokens`.
pub fn literal_run<T: fmt::Debug>(tokens: impl Into<Vec<T>>) -> Result<LiteralRun<T>, GrammarError> {
    let tokens = tokens.into();
    let expected = format!("{tokens:?}");
    run_of(tokens, expected)
}

/// Match the characters of `text`.
pub fn string(text: &str) -> Result<LiteralRun<char>, GrammarError> {
    run_of(text.chars().collect(), format!("{text:?}"))
}

/// Match the bytes of `text`.
pub fn bytes(text: &[u8]) -> Result<LiteralRun<u8>, GrammarError> {
    run_of(
        text.to_vec(),
        format!("{:?}", String::from_utf8_lossy(text)),
    )
}

fn run_of<T>(tokens: Vec<T>, expected: String) -> Result<LiteralRun<T>, GrammarError> {
    if tokens.is_empty() {
        return Err(GrammarError::EmptyLiteral);
    }
    Ok(LiteralRun { tokens, expected })
}

impl<T, V> Parser<T, V> for LiteralRun<T>
where
    T: PartialEq,
    V: FromTokens<T>,
{
    fn parse(&self, ctx: &mut ParseContext<'_, T, V>) -> bool {
        if ctx.guard_stopped() {
            return false;
        }
        match ctx.peek_n(self.tokens.len()) {
            Some(run) if run == self.tokens.as_slice() => {
                ctx.advance(run.len());
                ctx.push(V::from_run(run));
                true
            }
            Some(_) => {
                ctx.fail(ParseFailure::expected(ctx.position(), self.expected.clone()));
                false
            }
            None => {
                ctx.fail(ParseFailure::exhausted(ctx.input_len()));
                false
            }
        }
    }
}

// === Predicate ===

/// Matches a single token accepted by a function.
pub struct Predicate<T, F> {
    label: Cow<'static, str>,
    test: F,
    _token: PhantomData<fn(&T) -> bool>,
}

impl<T, F> fmt::Debug for Predicate<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate").field("label", &self.label).finish()
    }
}

/// Match one token for which `test` returns `true`.
pub fn predicate<T, F>(test: F) -> Predicate<T, F>
where
    F: Fn(&T) -> bool,
{
    predicate_labelled("matching token", test)
}

/// Like [`predicate`], naming what is expected for diagnostics.
pub fn predicate_labelled<T, F>(label: impl Into<Cow<'static, str>>, test: F) -> Predicate<T, F>
where
    F: Fn(&T) -> bool,
{
    Predicate {
        label: label.into(),
        test,
        _token: PhantomData,
    }
}

impl<T, V, F> Parser<T, V> for Predicate<T, F>
where
    F: Fn(&T) -> bool,
    V: FromTokens<T>,
{
    fn parse(&self, ctx: &mut ParseContext<'_, T, V>) -> bool {
        if ctx.guard_stopped() {
            return false;
        }
        match ctx.peek() {
            Some(token) if (self.test)(token) => accept(ctx, token),
            _ => {
                ctx.fail(ParseFailure::expected(ctx.position(), self.label.clone()));
                false
            }
        }
    }
}

// === Range ===

/// Matches a single token within an inclusive range.
#[derive(Clone, Debug)]
pub struct Range<T> {
    start: T,
    end: T,
}

/// Match one token in `start..=end`.
pub fn range<T>(start: T, end: T) -> Result<Range<T>, GrammarError>
where
    T: PartialOrd + fmt::Debug,
{
    match start.partial_cmp(&end) {
        Some(Ordering::Less | Ordering::Equal) => Ok(Range { start, end }),
        _ => Err(GrammarError::InvertedRange {
            start: format!("{start:?}"),
            end: format!("{end:?}"),
        }),
    }
}

impl<T, V> Parser<T, V> for Range<T>
where
    T: PartialOrd + fmt::Debug,
    V: FromTokens<T>,
{
    fn parse(&self, ctx: &mut ParseContext<'_, T, V>) -> bool {
        if ctx.guard_stopped() {
            return false;
        }
        match ctx.peek() {
            Some(token) if *token >= self.start && *token <= self.end => accept(ctx, token),
            _ => {
                ctx.fail(ParseFailure::expected(
                    ctx.position(),
                    format!("{:?}..={:?}", self.start, self.end),
                ));
                false
            }
        }
    }
}

// === Sets ===

/// Matches a single token that is (or is not) a member of a set.
#[derive(Clone, Debug)]
pub struct Set<T> {
    members: Vec<T>,
    negated: bool,
}

/// Match one token equal to any of `members`. An empty set never matches.
pub fn one_of<T>(members: impl Into<Vec<T>>) -> Set<T> {
    Set {
        members: members.into(),
        negated: false,
    }
}

/// Match one token equal to none of `members`. An empty set matches any
/// token.
pub fn none_of<T>(members: impl Into<Vec<T>>) -> Set<T> {
    Set {
        members: members.into(),
        negated: true,
    }
}

impl<T, V> Parser<T, V> for Set<T>
where
    T: PartialEq + fmt::Debug,
    V: FromTokens<T>,
{
    fn parse(&self, ctx: &mut ParseContext<'_, T, V>) -> bool {
        if ctx.guard_stopped() {
            return false;
        }
        let Some(token) = ctx.peek() else {
            return false;
        };
        if self.members.contains(token) != self.negated {
            return accept(ctx, token);
        }
        let failure = if self.negated {
            ParseFailure::unexpected(ctx.position(), format!("{token:?}"))
        } else {
            ParseFailure::expected(ctx.position(), format!("one of {:?}", self.members))
        };
        ctx.fail(failure);
        false
    }
}

// === Any ===

/// Matches any single token.
#[derive(Clone, Copy, Debug, Default)]
pub struct Any;

/// Match any one token; fails only at the end of input.
pub fn any() -> Any {
    Any
}

impl<T, V> Parser<T, V> for Any
where
    V: FromTokens<T>,
{
    fn parse(&self, ctx: &mut ParseContext<'_, T, V>) -> bool {
        if ctx.guard_stopped() {
            return false;
        }
        match ctx.peek() {
            Some(token) => accept(ctx, token),
            None => false,
        }
    }
}
