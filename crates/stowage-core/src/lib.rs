//! Core types for the Stowage value container.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! safe building blocks that `stowage-region` assembles into `Storage`:
//! placement selection, frame layout arithmetic, the canary sentinel,
//! corruption policy, and error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod canary;
pub mod error;
pub mod layout;
pub mod placement;
pub mod policy;

pub use canary::{Corruption, GuardLocation, GuardStatus};
pub use error::StorageError;
pub use layout::FrameLayout;
pub use placement::Placement;
pub use policy::CorruptionPolicy;
