//! Per-call reporting flags

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Bitset selecting how match data is reported
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MatchFlags(u32);

impl MatchFlags {
    /// Default ordering of `match_all`: one sequence per group
    pub const PATTERN_ORDER: MatchFlags = MatchFlags(1);
    /// Report the byte offset of every capture
    pub const OFFSET_CAPTURE: MatchFlags = MatchFlags(256);
    /// Report unmatched groups as null instead of the empty string
    pub const UNMATCHED_AS_NULL: MatchFlags = MatchFlags(512);

    const ALL: u32 = Self::PATTERN_ORDER.0 | Self::OFFSET_CAPTURE.0 | Self::UNMATCHED_AS_NULL.0;

    #[must_use]
    pub const fn empty() -> Self {
        MatchFlags(0)
    }

    /// Flags from raw bits, `None` if any unknown bit is set
    #[must_use]
    pub const fn from_bits(bits: u32) -> Option<Self> {
        if bits & !Self::ALL == 0 {
            Some(MatchFlags(bits))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn contains(self, other: MatchFlags) -> bool {
        self.0 & other.0 == other.0
    }

    #[must_use]
    pub const fn offset_capture(self) -> bool {
        self.contains(Self::OFFSET_CAPTURE)
    }

    #[must_use]
    pub const fn unmatched_as_null(self) -> bool {
        self.contains(Self::UNMATCHED_AS_NULL)
    }
}

impl BitOr for MatchFlags {
    type Output = MatchFlags;

    fn bitor(self, rhs: MatchFlags) -> MatchFlags {
        MatchFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for MatchFlags {
    fn bitor_assign(&mut self, rhs: MatchFlags) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for MatchFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = Vec::new();
        if self.contains(Self::PATTERN_ORDER) {
            names.push("PATTERN_ORDER");
        }
        if self.offset_capture() {
            names.push("OFFSET_CAPTURE");
        }
        if self.unmatched_as_null() {
            names.push("UNMATCHED_AS_NULL");
        }
        write!(f, "MatchFlags({})", names.join(" | "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_bits_are_rejected() {
        assert_eq!(MatchFlags::from_bits(0), Some(MatchFlags::empty()));
        assert_eq!(
            MatchFlags::from_bits(256 | 512),
            Some(MatchFlags::OFFSET_CAPTURE | MatchFlags::UNMATCHED_AS_NULL)
        );
        assert_eq!(MatchFlags::from_bits(2), None);
        assert_eq!(MatchFlags::from_bits(1024), None);
    }

    #[test]
    fn combined_flags_report_each_option() {
        let mut flags = MatchFlags::OFFSET_CAPTURE;
        assert!(flags.offset_capture());
        assert!(!flags.unmatched_as_null());
        flags |= MatchFlags::UNMATCHED_AS_NULL;
        assert!(flags.unmatched_as_null());
        assert_eq!(format!("{flags:?}"), "MatchFlags(OFFSET_CAPTURE | UNMATCHED_AS_NULL)");
    }
}
