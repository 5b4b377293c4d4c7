//! Canary sentinels and guard verification results.
//!
//! Guard regions are filled with a repeating four-byte sentinel. The
//! leading and trailing guards both start the pattern at their own byte
//! zero, so a mismatch offset is always relative to the guard it was
//! found in.

use std::fmt;

/// The repeating sentinel written into every guard region.
pub const SENTINEL: [u8; 4] = [0xDE, 0xAD, 0xBE, 0xEF];

/// Expected byte at `offset` within a guard region.
pub const fn sentinel_byte(offset: usize) -> u8 {
    SENTINEL[offset % SENTINEL.len()]
}

/// A full guard region of `N` bytes holding the sentinel pattern.
pub const fn pattern<const N: usize>() -> [u8; N] {
    let mut out = [0u8; N];
    let mut i = 0;
    while i < N {
        out[i] = sentinel_byte(i);
        i += 1;
    }
    out
}

/// Offset of the first byte in `guard` that differs from the sentinel.
///
/// Returns `None` when every byte matches, including for an empty slice.
pub fn first_mismatch(guard: &[u8]) -> Option<usize> {
    guard
        .iter()
        .enumerate()
        .position(|(i, &b)| b != sentinel_byte(i))
}

/// Which guard region a corruption was found in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GuardLocation {
    /// The guard before the value (underrun).
    Leading,
    /// The guard after the value (overrun).
    Trailing,
}

impl fmt::Display for GuardLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leading => f.write_str("leading"),
            Self::Trailing => f.write_str("trailing"),
        }
    }
}

/// A detected guard corruption.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Corruption {
    /// The guard region that no longer holds the sentinel.
    pub location: GuardLocation,
    /// Offset of the first mismatched byte within that guard.
    pub offset: usize,
}

impl Corruption {
    /// Scan a leading and a trailing guard, leading first.
    pub fn scan(leading: &[u8], trailing: &[u8]) -> Option<Self> {
        if let Some(offset) = first_mismatch(leading) {
            return Some(Self {
                location: GuardLocation::Leading,
                offset,
            });
        }
        first_mismatch(trailing).map(|offset| Self {
            location: GuardLocation::Trailing,
            offset,
        })
    }
}

impl fmt::Display for Corruption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} guard corrupted at byte {}",
            self.location, self.offset
        )
    }
}

/// Outcome of a guard verification query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GuardStatus {
    /// The container has no guard regions; nothing was checked.
    Disabled,
    /// Both guards still hold the sentinel pattern.
    Intact,
    /// At least one guard byte was overwritten.
    Corrupted(Corruption),
}

impl GuardStatus {
    /// Returns `true` only for [`GuardStatus::Corrupted`].
    pub fn is_corrupted(&self) -> bool {
        matches!(self, Self::Corrupted(_))
    }

    /// The corruption, if any.
    pub fn corruption(&self) -> Option<Corruption> {
        match self {
            Self::Corrupted(c) => Some(*c),
            _ => None,
        }
    }
}

impl fmt::Display for GuardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => f.write_str("disabled"),
            Self::Intact => f.write_str("intact"),
            Self::Corrupted(c) => write!(f, "corrupted ({c})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_repeats_sentinel() {
        let p: [u8; 6] = pattern();
        assert_eq!(p, [0xDE, 0xAD, 0xBE, 0xEF, 0xDE, 0xAD]);
    }

    #[test]
    fn empty_pattern() {
        let p: [u8; 0] = pattern();
        assert!(p.is_empty());
        assert_eq!(first_mismatch(&p), None);
    }

    #[test]
    fn intact_pattern_has_no_mismatch() {
        let p: [u8; 16] = pattern();
        assert_eq!(first_mismatch(&p), None);
    }

    #[test]
    fn first_mismatch_reports_lowest_offset() {
        let mut p: [u8; 8] = pattern();
        p[5] = 0;
        p[2] = 0;
        assert_eq!(first_mismatch(&p), Some(2));
    }

    #[test]
    fn scan_checks_leading_before_trailing() {
        let mut leading: [u8; 4] = pattern();
        let mut trailing: [u8; 4] = pattern();
        leading[3] = 0;
        trailing[0] = 0;
        let c = Corruption::scan(&leading, &trailing).unwrap();
        assert_eq!(c.location, GuardLocation::Leading);
        assert_eq!(c.offset, 3);
    }

    #[test]
    fn scan_reports_trailing() {
        let leading: [u8; 4] = pattern();
        let mut trailing: [u8; 4] = pattern();
        trailing[1] = 0xFF;
        let c = Corruption::scan(&leading, &trailing).unwrap();
        assert_eq!(
            c,
            Corruption {
                location: GuardLocation::Trailing,
                offset: 1
            }
        );
    }

    #[test]
    fn status_display() {
        let c = Corruption {
            location: GuardLocation::Trailing,
            offset: 0,
        };
        assert_eq!(GuardStatus::Intact.to_string(), "intact");
        assert_eq!(
            GuardStatus::Corrupted(c).to_string(),
            "corrupted (trailing guard corrupted at byte 0)"
        );
        assert!(GuardStatus::Corrupted(c).is_corrupted());
        assert!(!GuardStatus::Disabled.is_corrupted());
        assert_eq!(GuardStatus::Intact.corruption(), None);
    }
}
