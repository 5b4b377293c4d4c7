//! Benchmark profiles for Stowage containers.
//!
//! Each alias pairs a payload with guard and threshold settings so the
//! benches compare the same value under both placements:
//!
//! - [`InlineWord`] / [`OwnedWord`]: an 8-byte value, unguarded
//! - [`InlineGuardedWord`] / [`OwnedGuardedWord`]: the same with 16-byte canaries
//! - [`InlineBlock`] / [`OwnedBlock`]: a 256-byte value with 64-byte canaries

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use stowage_region::Storage;

/// Bytes in the block payload.
pub const BLOCK: usize = 256;

/// 8-byte value stored inline, no guards.
pub type InlineWord = Storage<u64, 0, 8>;
/// 8-byte value in an owned allocation, no guards.
pub type OwnedWord = Storage<u64, 0, 0>;
/// 8-byte value stored inline with 16-byte guards.
pub type InlineGuardedWord = Storage<u64, 16, 8>;
/// 8-byte value in an owned allocation with 16-byte guards.
pub type OwnedGuardedWord = Storage<u64, 16, 0>;
/// 256-byte value stored inline with 64-byte guards.
pub type InlineBlock = Storage<[u8; BLOCK], 64, BLOCK>;
/// 256-byte value in an owned allocation with 64-byte guards.
pub type OwnedBlock = Storage<[u8; BLOCK], 64, 0>;
