//! Test fixtures for Stowage development.
//!
//! Provides destructor accounting ([`DropCounter`], [`Tracked`]), a value
//! type with a fallible constructor ([`EvenNumber`]), payloads of known
//! size, and an [`EventCapture`] tracing layer for asserting on
//! diagnostic events.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod events;

use std::cell::Cell;
use std::error::Error;
use std::fmt;
use std::rc::Rc;

pub use events::{CapturedEvent, EventCapture};

/// Counts destructor runs across every [`Tracked`] it hands out.
#[derive(Clone, Debug, Default)]
pub struct DropCounter {
    drops: Rc<Cell<usize>>,
}

impl DropCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new tracked value reporting its drop to this counter.
    pub fn track(&self, id: u64) -> Tracked {
        Tracked {
            id,
            drops: Rc::clone(&self.drops),
        }
    }

    /// Destructor runs so far.
    pub fn drops(&self) -> usize {
        self.drops.get()
    }
}

/// A value that increments its [`DropCounter`] when dropped.
///
/// Clones report to the same counter, so assigning a clone over an old
/// value shows up as exactly one extra drop.
#[derive(Debug)]
pub struct Tracked {
    id: u64,
    drops: Rc<Cell<usize>>,
}

impl Tracked {
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            drops: Rc::clone(&self.drops),
        }
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

/// An integer that only accepts even values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EvenNumber(i64);

impl EvenNumber {
    pub fn new(n: i64) -> Result<Self, OddNumber> {
        if n % 2 == 0 {
            Ok(Self(n))
        } else {
            Err(OddNumber(n))
        }
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

/// Rejection from [`EvenNumber::new`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OddNumber(pub i64);

impl fmt::Display for OddNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is odd", self.0)
    }
}

impl Error for OddNumber {}

/// A byte payload of exactly `N` bytes, alignment 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Payload<const N: usize>(pub [u8; N]);

impl<const N: usize> Payload<N> {
    /// A payload whose bytes count up from `seed`, wrapping.
    pub fn seeded(seed: u8) -> Self {
        let mut bytes = [0u8; N];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = seed.wrapping_add(i as u8);
        }
        Self(bytes)
    }
}

impl<const N: usize> Default for Payload<N> {
    fn default() -> Self {
        Self([0; N])
    }
}
