//! Stack growth for recursive grammars.
//!
//! A grammar built from combinators recurses once per nesting level of the
//! input (`((((1))))` enters the expression rule four times). Rules that can
//! re-enter themselves run their body through [`ensure_sufficient_stack`], so
//! deeply nested but legal input grows the native stack instead of
//! overflowing it.
//!
//! - **Native targets**: `stacker` allocates a new segment when less than
//!   [`RED_ZONE`] bytes remain.
//! - **WASM targets**: passthrough.

/// Remaining stack below which a new segment is allocated (128KB).
pub const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (2MB).
pub const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if fewer than [`RED_ZONE`] bytes remain.
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    grow_with(RED_ZONE, SEGMENT_SIZE, f)
}

/// Run `f` with an explicit red zone and segment size.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn grow_with<R>(red_zone: usize, segment: usize, f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(red_zone, segment, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn grow_with<R>(_red_zone: usize, _segment: usize, f: impl FnOnce() -> R) -> R {
    f()
}

/// Bytes of stack left on the current segment, when the platform reports it.
#[cfg(not(target_arch = "wasm32"))]
pub fn remaining_stack() -> Option<usize> {
    stacker::remaining_stack()
}

#[cfg(target_arch = "wasm32")]
pub fn remaining_stack() -> Option<usize> {
    None
}
