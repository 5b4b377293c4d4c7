//! Inline or owned guarded frames for Stowage containers.
//!
//! [`Storage<T, GUARD, THRESHOLD>`](Storage) keeps one value of type `T`
//! inside a frame of raw bytes. Small values live in the container itself;
//! values larger than `THRESHOLD` bytes get a separate allocation the
//! container owns. With `GUARD > 0` the value is bracketed by canary bytes
//! that can be verified on demand.
//!
//! # Architecture
//!
//! ```text
//! Storage<T, GUARD, THRESHOLD>      (safe API: construct, access, assign, guard checks)
//! └── Region<T, GUARD, THRESHOLD>   (live value; drops it in place exactly once)
//!     └── Reservation               (acquired frame; releases the allocation exactly once)
//!         └── RawFrame union        (inline Frame bytes | NonNull<Frame>)
//!             └── Frame<T, GUARD>   (#[repr(C)] [leading guard][value][trailing guard])
//! ```
//!
//! Placement is a compile-time constant of each instantiation, so the union
//! carries no runtime tag. Every branch on placement folds away.
//!
//! # Safety
//!
//! All `unsafe` code lives in `raw.rs`; the rest of the crate denies it.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

mod frame;
mod raw;
pub mod storage;

pub use storage::Storage;
pub use stowage_core::{
    Corruption, CorruptionPolicy, FrameLayout, GuardLocation, GuardStatus, Placement,
    StorageError,
};
