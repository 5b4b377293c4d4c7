//! Byte layout of a guarded frame.
//!
//! A frame is `[leading guard][value][trailing guard]` laid out with
//! `#[repr(C)]` rules, both guards touching the value. [`FrameLayout`] reproduces that arithmetic so
//! callers can reason about offsets without touching the frame type.

/// Offsets and sizes of a `[leading guard][value][trailing guard]` frame.
///
/// Both placements use the same frame, so a layout computed here is valid
/// whether the frame lives inline or in an owned allocation.
///
/// Both guards touch the value: the leading guard ends at the byte before
/// the value and the trailing guard begins at the byte after it. When the
/// guard size is not a multiple of the value's alignment, the alignment
/// padding goes at the front of the frame, ahead of the leading guard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameLayout {
    /// Bytes in each guard region.
    pub guard: usize,
    /// `size_of` the stored value.
    pub value_size: usize,
    /// Alignment of the whole frame (equal to the value's alignment).
    pub align: usize,
    /// Offset of the leading guard. Zero unless alignment pads the front.
    pub leading_offset: usize,
    /// Offset of the value.
    pub value_offset: usize,
    /// Offset of the trailing guard.
    pub trailing_offset: usize,
    /// Total frame size including any padding.
    pub total_size: usize,
}

impl FrameLayout {
    /// Compute the layout for a value of `value_size` bytes aligned to
    /// `value_align`, guarded by `guard` bytes on each side.
    ///
    /// `value_align` must be a power of two, as every Rust alignment is.
    pub const fn for_value(value_size: usize, value_align: usize, guard: usize) -> Self {
        let value_offset = round_up(guard, value_align);
        let trailing_offset = value_offset + value_size;
        let total_size = round_up(trailing_offset + guard, value_align);
        Self {
            guard,
            value_size,
            align: value_align,
            leading_offset: value_offset - guard,
            value_offset,
            trailing_offset,
            total_size,
        }
    }

    /// Compute the layout for `T` with `guard` bytes on each side.
    pub const fn for_type<T>(guard: usize) -> Self {
        Self::for_value(std::mem::size_of::<T>(), std::mem::align_of::<T>(), guard)
    }

    /// Padding bytes at the front of the frame, ahead of the leading guard.
    pub const fn leading_padding(&self) -> usize {
        self.value_offset - self.guard
    }

    /// Returns `true` if the frame carries guard regions.
    pub const fn is_guarded(&self) -> bool {
        self.guard > 0
    }

    /// Returns `true` if the frame is exactly `2 * guard + value_size` bytes.
    pub const fn is_packed(&self) -> bool {
        self.total_size == 2 * self.guard + self.value_size
    }
}

const fn round_up(n: usize, align: usize) -> usize {
    (n + align - 1) & !(align - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unguarded_frame_is_just_the_value() {
        let layout = FrameLayout::for_type::<i32>(0);
        assert_eq!(layout.value_offset, 0);
        assert_eq!(layout.trailing_offset, 4);
        assert_eq!(layout.total_size, 4);
        assert!(!layout.is_guarded());
        assert!(layout.is_packed());
    }

    #[test]
    fn aligned_guard_packs_tightly() {
        let layout = FrameLayout::for_type::<i32>(4);
        assert_eq!(layout.leading_offset, 0);
        assert_eq!(layout.value_offset, 4);
        assert_eq!(layout.trailing_offset, 8);
        assert_eq!(layout.total_size, 12);
        assert_eq!(layout.leading_padding(), 0);
        assert!(layout.is_packed());
    }

    #[test]
    fn misaligned_guard_pads_ahead_of_leading_guard() {
        let layout = FrameLayout::for_type::<u64>(3);
        assert_eq!(layout.value_offset, 8);
        assert_eq!(layout.leading_padding(), 5);
        assert_eq!(layout.leading_offset, 5);
        assert_eq!(layout.leading_offset + layout.guard, layout.value_offset);
        assert_eq!(layout.trailing_offset, 16);
        assert_eq!(layout.total_size, 24);
        assert!(!layout.is_packed());
    }

    #[test]
    fn byte_values_never_pad() {
        let layout = FrameLayout::for_type::<[u8; 7]>(5);
        assert_eq!(layout.value_offset, 5);
        assert_eq!(layout.trailing_offset, 12);
        assert_eq!(layout.total_size, 17);
        assert!(layout.is_packed());
    }

    #[test]
    fn zero_sized_value_keeps_both_guards() {
        let layout = FrameLayout::for_type::<()>(4);
        assert_eq!(layout.value_offset, 4);
        assert_eq!(layout.trailing_offset, 4);
        assert_eq!(layout.total_size, 8);
    }
}
