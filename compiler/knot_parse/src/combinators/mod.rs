//! Higher-order parsers built from other parsers.
//!
//! | Family | Constructors |
//! |--------|--------------|
//! | Ordered choice | [`alt`], [`alt_list`], [`alt_discard`] |
//! | Sequence | [`seq`], [`seq_list`], [`seq_discard`] |
//! | Repetition | [`zero_or_more`], [`one_or_more`], [`at_least`], [`repeat`], [`separated`] |
//! | Wrappers | [`optional`], [`discard`], [`peek`], [`not`], [`label`] |
//! | Recursion | [`Recursive`], [`RuleRef`] |
//!
//! Every combinator that can partially succeed takes a [`Mark`] before
//! running its children and restores it on failure, so a failing combinator
//! never leaves residue behind, whatever its children do.
//!
//! [`Mark`]: crate::Mark

mod choice;
mod recursive;
mod repeat;
mod sequence;
mod wrap;

pub use choice::{alt, alt_discard, alt_list, Alt};
pub use recursive::{Recursive, RuleRef};
pub use repeat::{at_least, one_or_more, repeat, separated, zero_or_more, Repeat, Separated};
pub use sequence::{seq, seq_discard, seq_list, Seq};
pub use wrap::{discard, label, not, optional, peek, Discard, Label, Not, Optional, Peek};

use crate::context::ParseContext;
use crate::parser::{BoxedParser, Parser};

/// An ordered, non-empty list of parsers sharing token and value types.
///
/// Implemented for tuples of one to twelve parsers and for [`ParserVec`].
pub trait ParserList<T, V> {
    /// Number of parsers in the list.
    fn count(&self) -> usize;

    /// Run the parser at `index`. Out-of-range indices fail.
    fn parse_nth(&self, index: usize, ctx: &mut ParseContext<'_, T, V>) -> bool;
}

/// A runtime-sized list of boxed parsers.
///
/// Only obtainable through [`alt_list`] and [`seq_list`], which reject empty
/// lists.
pub struct ParserVec<'a, T, V>(Vec<BoxedParser<'a, T, V>>);

impl<'a, T, V> ParserVec<'a, T, V> {
    pub(crate) fn new(parsers: Vec<BoxedParser<'a, T, V>>) -> Option<Self> {
        if parsers.is_empty() {
            None
        } else {
            Some(ParserVec(parsers))
        }
    }
}

impl<T, V> ParserList<T, V> for ParserVec<'_, T, V> {
    #[inline]
    fn count(&self) -> usize {
        self.0.len()
    }

    #[inline]
    fn parse_nth(&self, index: usize, ctx: &mut ParseContext<'_, T, V>) -> bool {
        match self.0.get(index) {
            Some(parser) => parser.parse(ctx),
            None => false,
        }
    }
}

macro_rules! impl_parser_list {
    ($($name:ident . $idx:tt),+) => {
        impl<T, V, $($name),+> ParserList<T, V> for ($($name,)+)
        where
            $($name: Parser<T, V>,)+
        {
            #[inline]
            fn count(&self) -> usize {
                [$($idx),+].len()
            }

            #[inline]
            fn parse_nth(&self, index: usize, ctx: &mut ParseContext<'_, T, V>) -> bool {
                match index {
                    $($idx => self.$idx.parse(ctx),)+
                    _ => false,
                }
            }
        }
    };
}

impl_parser_list!(A.0);
impl_parser_list!(A.0, B.1);
impl_parser_list!(A.0, B.1, C.2);
impl_parser_list!(A.0, B.1, C.2, D.3);
impl_parser_list!(A.0, B.1, C.2, D.3, E.4);
impl_parser_list!(A.0, B.1, C.2, D.3, E.4, F.5);
impl_parser_list!(A.0, B.1, C.2, D.3, E.4, F.5, G.6);
impl_parser_list!(A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7);
impl_parser_list!(A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7, I.8);
impl_parser_list!(A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7, I.8, J.9);
impl_parser_list!(A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7, I.8, J.9, K.10);
impl_parser_list!(A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7, I.8, J.9, K.10, L.11);

#[cfg(test)]
mod tests;
