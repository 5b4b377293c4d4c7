//! The [`Storage`] value container.
//!
//! A `Storage<T, GUARD, THRESHOLD>` holds exactly one `T` in a frame of
//! `[GUARD canary bytes][T][GUARD canary bytes]`. The frame is kept inline
//! when `size_of::<T>() <= THRESHOLD`, otherwise in an allocation the
//! container owns and frees on drop.
//!
//! ```
//! use stowage_region::{CorruptionPolicy, GuardStatus, Placement, Storage};
//!
//! let mut small: Storage<i32, 4, 4> = Storage::new(0);
//! *small = 36;
//! assert_eq!(small.placement(), Placement::Inline);
//! assert_eq!(small.guard_status(), GuardStatus::Intact);
//! assert!(small.check_guard_values(CorruptionPolicy::ReportOnly).is_ok());
//!
//! let large: Storage<[u64; 8], 4, 16> = Storage::new([7; 8]);
//! assert!(large.is_owned());
//! assert_eq!(large[3], 7);
//! ```

use std::alloc;
use std::any::type_name;
use std::convert::Infallible;
use std::fmt;
use std::mem;
use std::ops::{Deref, DerefMut};

use stowage_core::{
    Corruption, CorruptionPolicy, FrameLayout, GuardStatus, Placement, StorageError,
};

use crate::raw::{InitError, Region};

/// A value stored inline or in an owned allocation, chosen by size, with
/// optional canary guards on both sides.
///
/// - `GUARD`: bytes of canary before and after the value. `0` disables
///   guarding entirely; [`Storage::guard_status`] then reports
///   [`GuardStatus::Disabled`] without reading any memory.
/// - `THRESHOLD`: values of at most this many bytes are stored inline.
///
/// Placement is fixed per instantiation ([`Storage::PLACEMENT`]). The value
/// never moves during access or assignment. Moving an inline container
/// moves its whole frame, guards included; an owned container's value
/// keeps its address for life.
///
/// The container's own footprint is the larger of the inline frame and a
/// pointer, whichever placement it uses. An owned container therefore
/// still occupies a whole frame: `Storage<[u8; 4096], 0, 0>` takes about
/// 4 KiB where it lives *and* allocates 4 KiB more. Only pick owned
/// placement for values where that doubled footprint is acceptable, or
/// store a `Box<T>` inline instead.
///
/// Guards are not checked implicitly. Call [`Storage::check_guard_values`]
/// at the points where corruption would matter.
pub struct Storage<T, const GUARD: usize, const THRESHOLD: usize> {
    region: Region<T, GUARD, THRESHOLD>,
}

impl<T, const GUARD: usize, const THRESHOLD: usize> Storage<T, GUARD, THRESHOLD> {
    /// Placement used by every container of this type.
    pub const PLACEMENT: Placement = Placement::for_type::<T>(THRESHOLD);

    /// Canary bytes on each side of the value.
    pub const GUARD_BYTES: usize = GUARD;

    /// Largest value size stored inline.
    pub const INLINE_THRESHOLD: usize = THRESHOLD;

    /// Store `value`.
    ///
    /// Aborts via [`std::alloc::handle_alloc_error`] if an owned frame
    /// cannot be allocated, as `Box::new` does. Use [`Storage::try_new`] to
    /// observe allocation failure instead.
    pub fn new(value: T) -> Self {
        Self::new_with(|| value)
    }

    /// Store the value produced by `init`, built after the frame is ready.
    pub fn new_with<F>(init: F) -> Self
    where
        F: FnOnce() -> T,
    {
        match Self::build(|| Ok::<T, Infallible>(init())) {
            Ok(storage) => storage,
            Err(InitError::Allocation(layout)) => alloc::handle_alloc_error(layout),
            Err(InitError::Construction(never)) => match never {},
        }
    }

    /// Store `value`, reporting allocation failure as an error.
    pub fn try_new(value: T) -> Result<Self, StorageError> {
        Self::try_new_with(|| Ok::<T, Infallible>(value))
    }

    /// Store the value produced by a fallible constructor.
    ///
    /// The frame is acquired first; if that fails `init` never runs. If
    /// `init` fails its error is returned as
    /// [`StorageError::Construction`] and the frame is released.
    pub fn try_new_with<E, F>(init: F) -> Result<Self, StorageError<E>>
    where
        F: FnOnce() -> Result<T, E>,
    {
        Self::build(init).map_err(|err| match err {
            InitError::Allocation(layout) => StorageError::Allocation {
                size: layout.size(),
                align: layout.align(),
            },
            InitError::Construction(e) => StorageError::Construction(e),
        })
    }

    /// Store a clone of `value`.
    pub fn cloned(value: &T) -> Self
    where
        T: Clone,
    {
        Self::new_with(|| value.clone())
    }

    fn build<E, F>(init: F) -> Result<Self, InitError<E>>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let region = Region::init_with(init).inspect_err(|err| {
            if let InitError::Allocation(layout) = err {
                tracing::debug!(
                    target: "stowage::storage",
                    value_type = type_name::<T>(),
                    size = layout.size(),
                    align = layout.align(),
                    "owned frame allocation failed"
                );
            }
        })?;
        let storage = Self { region };
        tracing::trace!(
            target: "stowage::storage",
            placement = %Self::PLACEMENT,
            address = ?storage.as_ptr(),
            value_type = type_name::<T>(),
            frame_size = Self::layout().total_size,
            "constructed"
        );
        Ok(storage)
    }

    /// Placement of this container.
    pub fn placement(&self) -> Placement {
        Self::PLACEMENT
    }

    /// Returns `true` if the frame lives inside the container.
    pub fn is_inline(&self) -> bool {
        Self::PLACEMENT.is_inline()
    }

    /// Returns `true` if the frame lives in an owned allocation.
    pub fn is_owned(&self) -> bool {
        Self::PLACEMENT.is_owned()
    }

    /// Byte layout of the frame.
    pub fn layout() -> FrameLayout {
        let layout = FrameLayout::for_type::<T>(GUARD);
        debug_assert_eq!(
            layout.total_size,
            Region::<T, GUARD, THRESHOLD>::frame_layout().size()
        );
        layout
    }

    /// Shared reference to the value.
    pub fn get(&self) -> &T {
        self.region.value()
    }

    /// Mutable reference to the value.
    pub fn get_mut(&mut self) -> &mut T {
        self.region.value_mut()
    }

    /// Address of the value.
    pub fn as_ptr(&self) -> *const T {
        self.region.value_ptr()
    }

    /// Mutable address of the value.
    ///
    /// The pointer is derived from the whole frame, so writing past the
    /// value's end lands in the trailing guard (and before its start, in the
    /// leading guard) where [`Storage::guard_status`] will see it.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.region.value_mut_ptr()
    }

    /// Replace the value in place, dropping the old one.
    pub fn set(&mut self, value: T) {
        *self.get_mut() = value;
    }

    /// Copy-assign `value` over the stored value via [`Clone::clone_from`].
    pub fn assign(&mut self, value: &T)
    where
        T: Clone,
    {
        self.get_mut().clone_from(value);
    }

    /// Replace the value in place, returning the old one.
    pub fn replace(&mut self, value: T) -> T {
        mem::replace(self.get_mut(), value)
    }

    /// Take the value out, releasing the frame.
    pub fn into_inner(self) -> T {
        self.region.into_value()
    }

    /// Compare both guards against the sentinel pattern.
    ///
    /// Read-only and idempotent. Always [`GuardStatus::Disabled`] when
    /// `GUARD == 0`.
    pub fn guard_status(&self) -> GuardStatus {
        if GUARD == 0 {
            return GuardStatus::Disabled;
        }
        let (leading, trailing) = self.region.guards();
        match Corruption::scan(leading, trailing) {
            Some(corruption) => GuardStatus::Corrupted(corruption),
            None => GuardStatus::Intact,
        }
    }

    /// Verify the guards and react to corruption according to `policy`.
    ///
    /// With [`CorruptionPolicy::TerminateProcessImmediately`] a corrupted
    /// guard is logged at error level and the process aborts; this call
    /// does not return. With [`CorruptionPolicy::ReportOnly`] the
    /// corruption comes back as [`StorageError::CanaryCorrupted`].
    ///
    /// Unguarded containers always pass.
    pub fn check_guard_values(&self, policy: CorruptionPolicy) -> Result<(), StorageError> {
        let Some(corruption) = self.guard_status().corruption() else {
            return Ok(());
        };
        match policy {
            CorruptionPolicy::TerminateProcessImmediately => {
                tracing::error!(
                    target: "stowage::storage",
                    location = %corruption.location,
                    offset = corruption.offset,
                    placement = %Self::PLACEMENT,
                    address = ?self.as_ptr(),
                    "canary corruption detected, aborting"
                );
                std::process::abort()
            }
            CorruptionPolicy::ReportOnly => {
                tracing::warn!(
                    target: "stowage::storage",
                    location = %corruption.location,
                    offset = corruption.offset,
                    placement = %Self::PLACEMENT,
                    address = ?self.as_ptr(),
                    "canary corruption detected"
                );
                Err(StorageError::CanaryCorrupted(corruption))
            }
        }
    }

    /// [`Storage::check_guard_values`] with the default policy, which aborts.
    pub fn check_guards(&self) -> Result<(), StorageError> {
        self.check_guard_values(CorruptionPolicy::default())
    }
}

impl<T, const GUARD: usize, const THRESHOLD: usize> Deref for Storage<T, GUARD, THRESHOLD> {
    type Target = T;

    fn deref(&self) -> &T {
        self.get()
    }
}

impl<T, const GUARD: usize, const THRESHOLD: usize> DerefMut for Storage<T, GUARD, THRESHOLD> {
    fn deref_mut(&mut self) -> &mut T {
        self.get_mut()
    }
}

impl<T, const GUARD: usize, const THRESHOLD: usize> AsRef<T> for Storage<T, GUARD, THRESHOLD> {
    fn as_ref(&self) -> &T {
        self.get()
    }
}

impl<T, const GUARD: usize, const THRESHOLD: usize> AsMut<T> for Storage<T, GUARD, THRESHOLD> {
    fn as_mut(&mut self) -> &mut T {
        self.get_mut()
    }
}

impl<T, const GUARD: usize, const THRESHOLD: usize> From<T> for Storage<T, GUARD, THRESHOLD> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: Default, const GUARD: usize, const THRESHOLD: usize> Default
    for Storage<T, GUARD, THRESHOLD>
{
    fn default() -> Self {
        Self::new_with(T::default)
    }
}

/// Clones into a fresh frame with freshly written guards.
impl<T: Clone, const GUARD: usize, const THRESHOLD: usize> Clone
    for Storage<T, GUARD, THRESHOLD>
{
    fn clone(&self) -> Self {
        Self::cloned(self.get())
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign(source.get());
    }
}

impl<T: PartialEq, const GUARD: usize, const THRESHOLD: usize> PartialEq
    for Storage<T, GUARD, THRESHOLD>
{
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}

impl<T: Eq, const GUARD: usize, const THRESHOLD: usize> Eq for Storage<T, GUARD, THRESHOLD> {}

impl<T: fmt::Debug, const GUARD: usize, const THRESHOLD: usize> fmt::Debug
    for Storage<T, GUARD, THRESHOLD>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storage")
            .field("value", self.get())
            .field("placement", &Self::PLACEMENT)
            .field("guards", &self.guard_status())
            .finish()
    }
}

impl<T: fmt::Display, const GUARD: usize, const THRESHOLD: usize> fmt::Display
    for Storage<T, GUARD, THRESHOLD>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.get(), f)
    }
}
