//! Result projection: reshape the values a parser pushes.
//!
//! Every projection runs its child first and only touches the stack when the
//! child matched, so a failed child is never observed by the projection
//! function.
//!
//! | Constructor | Child's values become |
//! |-------------|-----------------------|
//! | [`map`] | `f(values)` |
//! | [`map_last`] | all but the last, then `f(last)` |
//! | [`replace`] | a clone of the given value |
//! | [`fold`] | `values.fold(init, f)` |
//! | [`join`] | the concatenation of the `String` values |

use crate::context::ParseContext;
use crate::parser::Parser;

/// Collapses everything its child pushed into one value.
#[derive(Clone, Debug)]
pub struct Map<P, F> {
    parser: P,
    f: F,
}

/// On success, drain every value `parser` pushed and push `f(values)`.
///
/// `f` also runs when the child pushed nothing; it then receives an empty
/// vector.
pub fn map<P, F>(parser: P, f: F) -> Map<P, F> {
    Map { parser, f }
}

impl<T, V, P, F> Parser<T, V> for Map<P, F>
where
    P: Parser<T, V>,
    F: Fn(Vec<V>) -> V,
{
    fn parse(&self, ctx: &mut ParseContext<'_, T, V>) -> bool {
        let start = ctx.mark();
        if !self.parser.parse(ctx) {
            return false;
        }
        let values = ctx.drain_from(start);
        ctx.push((self.f)(values));
        true
    }
}

/// Transforms the last value its child pushed.
#[derive(Clone, Debug)]
pub struct MapLast<P, F> {
    parser: P,
    f: F,
}

/// On success, replace the most recent value `parser` pushed with
/// `f(value)`. Leaves the stack alone if the child pushed nothing.
pub fn map_last<P, F>(parser: P, f: F) -> MapLast<P, F> {
    MapLast { parser, f }
}

impl<T, V, P, F> Parser<T, V> for MapLast<P, F>
where
    P: Parser<T, V>,
    F: Fn(V) -> V,
{
    fn parse(&self, ctx: &mut ParseContext<'_, T, V>) -> bool {
        let start = ctx.mark();
        if !self.parser.parse(ctx) {
            return false;
        }
        if ctx.results().len() > start.results_len() {
            if let Some(last) = ctx.pop() {
                ctx.push((self.f)(last));
            }
        }
        true
    }
}

/// Swaps its child's values for a constant.
#[derive(Clone, Debug)]
pub struct Replace<P, V> {
    parser: P,
    value: V,
}

/// On success, drop the values `parser` pushed and push a clone of `value`.
pub fn replace<P, V>(parser: P, value: V) -> Replace<P, V> {
    Replace { parser, value }
}

impl<T, V, P> Parser<T, V> for Replace<P, V>
where
    P: Parser<T, V>,
    V: Clone,
{
    fn parse(&self, ctx: &mut ParseContext<'_, T, V>) -> bool {
        let start = ctx.mark();
        if !self.parser.parse(ctx) {
            return false;
        }
        ctx.truncate_results(start);
        ctx.push(self.value.clone());
        true
    }
}

/// Folds its child's values left to right.
#[derive(Clone, Debug)]
pub struct Fold<P, V, F> {
    parser: P,
    init: V,
    f: F,
}

/// On success, fold the values `parser` pushed, oldest first, starting from
/// a clone of `init`, and push the result.
///
/// ```text
/// // "1+2+3" with numbers pushed as f64 values
/// fold(separated(number, discard(literal('+')), 1), 0.0, |acc, n| acc + n)
/// ```
pub fn fold<P, V, F>(parser: P, init: V, f: F) -> Fold<P, V, F> {
    Fold { parser, init, f }
}

impl<T, V, P, F> Parser<T, V> for Fold<P, V, F>
where
    P: Parser<T, V>,
    V: Clone,
    F: Fn(V, V) -> V,
{
    fn parse(&self, ctx: &mut ParseContext<'_, T, V>) -> bool {
        let start = ctx.mark();
        if !self.parser.parse(ctx) {
            return false;
        }
        let folded = ctx
            .drain_from(start)
            .into_iter()
            .fold(self.init.clone(), &self.f);
        ctx.push(folded);
        true
    }
}

/// Concatenates its child's string values.
#[derive(Clone, Debug)]
pub struct Join<P> {
    parser: P,
}

/// On success, replace the `String`s `parser` pushed with their
/// concatenation. Useful to turn `one_or_more(digit)` into one number
/// literal.
pub fn join<P>(parser: P) -> Join<P> {
    Join { parser }
}

impl<T, P> Parser<T, String> for Join<P>
where
    P: Parser<T, String>,
{
    fn parse(&self, ctx: &mut ParseContext<'_, T, String>) -> bool {
        let start = ctx.mark();
        if !self.parser.parse(ctx) {
            return false;
        }
        let joined = ctx.drain_from(start).concat();
        ctx.push(joined);
        true
    }
}
