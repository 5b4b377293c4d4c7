//! Raw frame storage and in-place value lifetime.
//!
//! The only module in `stowage-region` permitted to use `unsafe`. Every
//! `unsafe` block carries a `// SAFETY:` comment naming the invariant it
//! relies on.
//!
//! Two layers split the responsibilities:
//! - [`Reservation`] owns the frame bytes. It releases an owned allocation
//!   on drop and never touches the value.
//! - [`Region`] owns a reservation whose value is live. It drops the value
//!   in place, then lets the reservation release the bytes.
//!
//! Because the reservation is a field of the region, the allocation is
//! released even when `T`'s destructor panics.

#![allow(unsafe_code)]

use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::mem::{ManuallyDrop, MaybeUninit};
use std::ptr::{self, NonNull};

use stowage_core::{canary, Placement};

use crate::frame::Frame;

/// One frame's worth of bytes, or a pointer to an owned frame.
///
/// `#[repr(C)]` puts both fields at offset zero, so a pointer to the union
/// is also a pointer to the inline frame. Which field is live is decided by
/// the owning type's placement constant, never by a runtime tag.
#[repr(C)]
union RawFrame<T, const GUARD: usize> {
    inline: ManuallyDrop<MaybeUninit<Frame<T, GUARD>>>,
    owned: NonNull<Frame<T, GUARD>>,
}

/// The `GUARD` bytes ending at the value's first byte.
///
/// # Safety
///
/// `frame` must point at a reserved frame. The result is only valid as
/// long as that frame is.
unsafe fn leading_guard<T, const GUARD: usize>(frame: *mut Frame<T, GUARD>) -> *mut [u8; GUARD] {
    // SAFETY: the value starts at least `GUARD` bytes into the frame, so
    // stepping back `GUARD` bytes stays inside it. No read occurs.
    unsafe {
        ptr::addr_of_mut!((*frame).value)
            .cast::<u8>()
            .sub(GUARD)
            .cast::<[u8; GUARD]>()
    }
}

/// Why [`Region::init_with`] failed.
pub(crate) enum InitError<E> {
    /// The owned frame could not be allocated.
    Allocation(Layout),
    /// The value constructor returned an error.
    Construction(E),
}

/// Frame bytes for one value: inline, or behind an exclusively owned
/// allocation. The value slot is uninitialised.
struct Reservation<T, const GUARD: usize, const THRESHOLD: usize> {
    raw: RawFrame<T, GUARD>,
}

impl<T, const GUARD: usize, const THRESHOLD: usize> Reservation<T, GUARD, THRESHOLD> {
    const PLACEMENT: Placement = Placement::for_type::<T>(THRESHOLD);

    /// Reserve frame bytes. Nothing is written into them.
    fn acquire() -> Result<Self, Layout> {
        let raw = match Self::PLACEMENT {
            Placement::Inline => RawFrame {
                inline: ManuallyDrop::new(MaybeUninit::uninit()),
            },
            Placement::Owned => {
                let layout = Layout::new::<Frame<T, GUARD>>();
                debug_assert!(layout.size() > 0);
                // SAFETY: owned placement means size_of::<T>() > THRESHOLD,
                // so the frame holds at least one byte and `layout` is non-zero.
                let ptr = unsafe { alloc::alloc(layout) };
                match NonNull::new(ptr.cast::<Frame<T, GUARD>>()) {
                    Some(owned) => RawFrame { owned },
                    None => return Err(layout),
                }
            }
        };
        Ok(Self { raw })
    }

    fn frame_ptr(&self) -> *const Frame<T, GUARD> {
        match Self::PLACEMENT {
            Placement::Inline => ptr::addr_of!(self.raw).cast(),
            // SAFETY: `owned` is the field written by `acquire` for owned placement.
            Placement::Owned => unsafe { self.raw.owned.as_ptr() },
        }
    }

    fn frame_mut_ptr(&mut self) -> *mut Frame<T, GUARD> {
        match Self::PLACEMENT {
            Placement::Inline => ptr::addr_of_mut!(self.raw).cast(),
            // SAFETY: `owned` is the field written by `acquire` for owned placement.
            Placement::Owned => unsafe { self.raw.owned.as_ptr() },
        }
    }

    /// Fill both guard regions with the sentinel pattern. Front padding, if
    /// any, stays unwritten.
    fn write_guards(&mut self) {
        if GUARD == 0 {
            return;
        }
        let frame = self.frame_mut_ptr();
        // SAFETY: `frame` points at a reserved frame valid for writes; the
        // guard arrays are plain bytes and need no prior initialisation.
        unsafe {
            leading_guard(frame).write(canary::pattern::<GUARD>());
            ptr::addr_of_mut!((*frame).trailing).write(canary::pattern::<GUARD>());
        }
    }
}

impl<T, const GUARD: usize, const THRESHOLD: usize> Drop for Reservation<T, GUARD, THRESHOLD> {
    fn drop(&mut self) {
        if let Placement::Owned = Self::PLACEMENT {
            // SAFETY: `owned` came from `alloc::alloc` with this exact layout
            // and is released nowhere else.
            unsafe {
                alloc::dealloc(
                    self.raw.owned.as_ptr().cast::<u8>(),
                    Layout::new::<Frame<T, GUARD>>(),
                );
            }
        }
    }
}

/// A reservation holding a live `T` and, when guarded, written canaries.
pub(crate) struct Region<T, const GUARD: usize, const THRESHOLD: usize> {
    slot: Reservation<T, GUARD, THRESHOLD>,
    _owns: PhantomData<T>,
}

// SAFETY: a region exclusively owns its value and frame, exactly as `Box<T>`
// does, so it may cross threads whenever `T` may.
unsafe impl<T: Send, const GUARD: usize, const THRESHOLD: usize> Send
    for Region<T, GUARD, THRESHOLD>
{
}

// SAFETY: shared access only hands out `&T` and reads guard bytes.
unsafe impl<T: Sync, const GUARD: usize, const THRESHOLD: usize> Sync
    for Region<T, GUARD, THRESHOLD>
{
}

impl<T, const GUARD: usize, const THRESHOLD: usize> Region<T, GUARD, THRESHOLD> {
    pub(crate) const PLACEMENT: Placement = Placement::for_type::<T>(THRESHOLD);

    /// Layout of an owned frame allocation.
    pub(crate) fn frame_layout() -> Layout {
        Layout::new::<Frame<T, GUARD>>()
    }

    /// Reserve a frame, write its guards, then construct the value.
    ///
    /// If allocation fails nothing is written. If `init` fails or panics the
    /// reservation is dropped and its allocation released.
    pub(crate) fn init_with<E, F>(init: F) -> Result<Self, InitError<E>>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let mut slot = Reservation::acquire().map_err(InitError::Allocation)?;
        slot.write_guards();
        let value = init().map_err(InitError::Construction)?;
        let frame = slot.frame_mut_ptr();
        // SAFETY: the value slot is reserved, aligned for `T`, and not yet
        // initialised, so writing does not overwrite a live value.
        unsafe {
            ptr::addr_of_mut!((*frame).value).write(MaybeUninit::new(value));
        }
        Ok(Self {
            slot,
            _owns: PhantomData,
        })
    }

    pub(crate) fn value_ptr(&self) -> *const T {
        let frame = self.slot.frame_ptr();
        // SAFETY: projecting a field of a valid frame pointer; no read occurs.
        unsafe { ptr::addr_of!((*frame).value).cast::<T>() }
    }

    /// Pointer to the value carrying provenance over the whole frame.
    pub(crate) fn value_mut_ptr(&mut self) -> *mut T {
        let frame = self.slot.frame_mut_ptr();
        // SAFETY: projecting a field of a valid frame pointer; no write occurs.
        unsafe { ptr::addr_of_mut!((*frame).value).cast::<T>() }
    }

    pub(crate) fn value(&self) -> &T {
        // SAFETY: a region only exists once its value is initialised, and the
        // returned borrow is tied to `&self`.
        unsafe { &*self.value_ptr() }
    }

    pub(crate) fn value_mut(&mut self) -> &mut T {
        // SAFETY: as for `value`, with exclusivity from `&mut self`.
        unsafe { &mut *self.value_mut_ptr() }
    }

    /// The leading and trailing guard bytes.
    pub(crate) fn guards(&self) -> (&[u8], &[u8]) {
        let frame = self.slot.frame_ptr().cast_mut();
        // SAFETY: `init_with` wrote both guard arrays before the region
        // existed; out-of-bounds writes can change them but cannot make
        // them uninitialised.
        let (leading, trailing): (&[u8; GUARD], &[u8; GUARD]) = unsafe {
            (
                &*leading_guard(frame),
                &*ptr::addr_of!((*frame).trailing),
            )
        };
        (leading.as_slice(), trailing.as_slice())
    }

    /// Move the value out and release the frame without dropping the value.
    pub(crate) fn into_value(self) -> T {
        let mut this = ManuallyDrop::new(self);
        let value_ptr = this.value_mut_ptr();
        // SAFETY: the value is live and `this` will not drop it again. The
        // reservation is read out exactly once and dropped here, releasing
        // the frame.
        unsafe {
            let value = ptr::read(value_ptr);
            drop(ptr::read(&this.slot));
            value
        }
    }
}

impl<T, const GUARD: usize, const THRESHOLD: usize> Drop for Region<T, GUARD, THRESHOLD> {
    fn drop(&mut self) {
        let address = self.value_mut_ptr();
        // SAFETY: the value is live and this is the only place it is dropped.
        // `slot` drops after this body and releases the frame.
        unsafe { ptr::drop_in_place(address) };
        tracing::trace!(
            target: "stowage::storage",
            placement = %Self::PLACEMENT,
            address = ?address,
            "released"
        );
    }
}
