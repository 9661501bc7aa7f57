//! The [`Parser`] capability and the value conversion used by primitives.
//!
//! A parser is anything that can be run against a [`ParseContext`] and
//! answer whether it matched. Plain functions and closures qualify:
//!
//! ```text
//! fn digit(ctx: &mut ParseContext<'_, char, String>) -> bool {
//!     range('0', '9')?.parse(ctx)
//! }
//! ```
//!
//! Combinators in this crate are structs implementing [`Parser`]; the
//! provided methods on the trait are shorthands for the free constructor
//! functions so grammars can be written left to right.

use std::borrow::Cow;

use crate::combinators::{discard, label, optional, Discard, Label, Optional};
use crate::context::ParseContext;
use crate::projection::{map, map_last, replace, Map, MapLast, Replace};

/// A parser over tokens `T` producing values `V`.
///
/// `parse` returns `true` on a match, having advanced the context and
/// possibly pushed values. On `false` the position and the result stack
/// must be exactly as they were on entry.
///
/// Primitives implement `Parser<T, V>` for every `V: FromTokens<T>`, so a
/// method call directly on one (`literal('-').discard()`) cannot pick `V`.
/// Use the free constructors there, or fix `V` first with a typed binding
/// or a [`BoxedParser`].
pub trait Parser<T, V> {
    fn parse(&self, ctx: &mut ParseContext<'_, T, V>) -> bool;

    /// See [`map`](crate::map).
    fn map<F>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: Fn(Vec<V>) -> V,
    {
        map(self, f)
    }

    /// See [`map_last`](crate::map_last).
    fn map_last<F>(self, f: F) -> MapLast<Self, F>
    where
        Self: Sized,
        F: Fn(V) -> V,
    {
        map_last(self, f)
    }

    /// See [`replace`](crate::replace).
    fn replace(self, value: V) -> Replace<Self, V>
    where
        Self: Sized,
        V: Clone,
    {
        replace(self, value)
    }

    /// See [`discard`](crate::discard).
    fn discard(self) -> Discard<Self>
    where
        Self: Sized,
    {
        discard(self)
    }

    /// See [`optional`](crate::optional).
    fn optional(self) -> Optional<Self>
    where
        Self: Sized,
    {
        optional(self)
    }

    /// See [`label`](crate::label).
    fn label(self, name: impl Into<Cow<'static, str>>) -> Label<Self>
    where
        Self: Sized,
    {
        label(self, name)
    }

    /// Erase the parser's type.
    fn boxed<'a>(self) -> BoxedParser<'a, T, V>
    where
        Self: Sized + 'a,
    {
        Box::new(self)
    }
}

/// A type-erased parser, used where parsers of different types are stored
/// together (`alt_list`, `seq_list`, recursive rules).
pub type BoxedParser<'a, T, V> = Box<dyn Parser<T, V> + 'a>;

impl<T, V, F> Parser<T, V> for F
where
    F: Fn(&mut ParseContext<'_, T, V>) -> bool,
{
    #[inline]
    fn parse(&self, ctx: &mut ParseContext<'_, T, V>) -> bool {
        self(ctx)
    }
}

impl<'a, T, V> Parser<T, V> for Box<dyn Parser<T, V> + 'a> {
    #[inline]
    fn parse(&self, ctx: &mut ParseContext<'_, T, V>) -> bool {
        (**self).parse(ctx)
    }
}

/// Conversion from matched input tokens into a result value.
///
/// Primitives push `from_token` for a single matched token and `from_run`
/// for a fixed-length literal run.
pub trait FromTokens<T> {
    fn from_token(token: &T) -> Self;
    fn from_run(tokens: &[T]) -> Self;
}

impl FromTokens<char> for String {
    fn from_token(token: &char) -> Self {
        token.to_string()
    }

    fn from_run(tokens: &[char]) -> Self {
        tokens.iter().collect()
    }
}

/// Lossy: a run is decoded as UTF-8 as a whole, but a single token is
/// decoded on its own, so every byte of `0x80` or above becomes U+FFFD.
/// Byte grammars that need the exact bytes should produce `Vec<u8>`.
impl FromTokens<u8> for String {
    fn from_token(token: &u8) -> Self {
        String::from_utf8_lossy(std::slice::from_ref(token)).into_owned()
    }

    fn from_run(tokens: &[u8]) -> Self {
        String::from_utf8_lossy(tokens).into_owned()
    }
}

impl<T: Clone> FromTokens<T> for Vec<T> {
    fn from_token(token: &T) -> Self {
        vec![token.clone()]
    }

    fn from_run(tokens: &[T]) -> Self {
        tokens.to_vec()
    }
}

/// For recognizers that only care whether the input matches.
impl<T> FromTokens<T> for () {
    fn from_token(_: &T) -> Self {}

    fn from_run(_: &[T]) -> Self {}
}
