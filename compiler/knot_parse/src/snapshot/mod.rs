//! Context marks for rollback.
//!
//! A [`Mark`] records the two pieces of state a failed attempt may have
//! touched: the cursor position and the result-stack length. Restoring it
//! with [`ParseContext::reset`](crate::ParseContext::reset) undoes the
//! attempt without copying the input or the stack.
//!
//! ```text
//! let start = ctx.mark();
//! if !first.parse(ctx) || !second.parse(ctx) {
//!     ctx.reset(start);
//!     return false;
//! }
//! ```

/// A lightweight snapshot of a parse context.
///
/// # Size
///
/// - `position`: 8 bytes
/// - `results_len`: 8 bytes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mark {
    pub(crate) position: usize,
    pub(crate) results_len: usize,
}

impl Mark {
    #[inline]
    pub(crate) fn new(position: usize, results_len: usize) -> Self {
        Mark {
            position,
            results_len,
        }
    }

    /// Cursor position at the time of the mark.
    #[inline]
    pub fn position(self) -> usize {
        self.position
    }

    /// Result-stack length at the time of the mark.
    #[inline]
    pub fn results_len(self) -> usize {
        self.results_len
    }
}
