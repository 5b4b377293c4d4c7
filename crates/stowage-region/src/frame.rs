//! The guarded frame type shared by both placements.

use std::mem::MaybeUninit;

/// `[lead-in][value][trailing guard]` in `#[repr(C)]` order.
///
/// The leading guard is the last `GUARD` bytes before `value`, not the
/// `lead_in` field itself. When `GUARD` is not a multiple of the value's
/// alignment the compiler pads between `lead_in` and `value`, and the
/// guard then spans the tail of `lead_in` plus that padding. Either way it
/// ends flush against the value's first byte.
///
/// Never constructed as a whole value; `raw.rs` only ever reaches it
/// through pointers and writes each part separately.
#[repr(C)]
pub(crate) struct Frame<T, const GUARD: usize> {
    // Reserves room for the leading guard; addressed relative to `value`.
    #[allow(dead_code)]
    pub(crate) lead_in: [u8; GUARD],
    pub(crate) value: MaybeUninit<T>,
    pub(crate) trailing: [u8; GUARD],
}
