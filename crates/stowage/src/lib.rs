//! Stowage: a value container that picks inline or owned storage by size
//! and can bracket the value with canary guards.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Stowage sub-crates. For most users, adding `stowage` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use stowage::prelude::*;
//!
//! // 4-byte canaries; values up to 4 bytes stay inline.
//! let mut small: Storage<i32, 4, 4> = Storage::default();
//! small.set(36);
//! assert_eq!(*small, 36);
//! assert_eq!(small.placement(), Placement::Inline);
//! assert_eq!(small.guard_status(), GuardStatus::Intact);
//!
//! // Same guards, but a 1-byte threshold pushes the i32 into its own allocation.
//! let big: Storage<i32, 4, 1> = Storage::new(36);
//! assert_eq!(big.placement(), Placement::Owned);
//! assert!(big.check_guard_values(CorruptionPolicy::ReportOnly).is_ok());
//!
//! // A failing constructor surfaces as a construction error.
//! let err = Storage::<u8, 0, 1>::try_new_with(|| u8::try_from(300)).unwrap_err();
//! assert!(matches!(err, StorageError::Construction(_)));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`region`] | `stowage-region` | `Storage` and its raw frame |
//! | [`types`] | `stowage-core` | Placement, layout, canary, policy, errors |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// The container and its frame (`stowage-region`).
pub use stowage_region as region;

/// Placement, layout, canary, policy and error types (`stowage-core`).
///
/// [`types::canary`] exposes the sentinel pattern for callers that want to
/// inspect guard bytes themselves.
pub use stowage_core as types;

pub use stowage_region::Storage;

/// Common imports for typical Stowage usage.
///
/// ```rust
/// use stowage::prelude::*;
/// ```
pub mod prelude {
    pub use stowage_core::{
        Corruption, CorruptionPolicy, FrameLayout, GuardLocation, GuardStatus, Placement,
        StorageError,
    };
    pub use stowage_region::Storage;
}
