//! Byte ranges into source text.

use std::fmt;
use std::ops::Range;

/// Half-open byte range `[start, end)` into the source of one translation unit.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Empty span at `pos`.
    #[inline]
    pub const fn point(pos: u32) -> Self {
        Span {
            start: pos,
            end: pos,
        }
    }

    /// Build from a `logos`-style byte range; positions past `u32::MAX` saturate.
    pub fn from_range(range: Range<usize>) -> Self {
        let clamp = |pos: usize| u32::try_from(pos).unwrap_or(u32::MAX);
        Span {
            start: clamp(range.start),
            end: clamp(range.end),
        }
    }

    #[inline]
    pub fn to_range(self) -> Range<usize> {
        self.start as usize..self.end as usize
    }

    #[inline]
    pub const fn len(self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.start >= self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
