// src/clock/glyph.rs

//! Glyph table - maps a decimal digit onto its 3x5 block pattern.
//!
//! Patterns are stored column-major: entries 0..5 are the left column top to
//! bottom, 5..10 the middle column and 10..15 the right column.

/// Number of segments in one glyph group.
pub const SEGMENTS_PER_GLYPH: usize = 15;

/// Columns and rows of the block grid a glyph is drawn on.
pub const GLYPH_COLUMNS: usize = 3;
pub const GLYPH_ROWS: usize = 5;

/// On/off state for each of the 15 segments of a glyph.
pub type GlyphPattern = [bool; SEGMENTS_PER_GLYPH];

const fn pattern(bits: [u8; SEGMENTS_PER_GLYPH]) -> GlyphPattern {
    let mut out = [false; SEGMENTS_PER_GLYPH];
    let mut i = 0;
    while i < SEGMENTS_PER_GLYPH {
        out[i] = bits[i] == 1;
        i += 1;
    }
    out
}

static GLYPHS: [GlyphPattern; 10] = [
    pattern([1, 1, 1, 1, 1, 1, 0, 0, 0, 1, 1, 1, 1, 1, 1]), // 0
    pattern([1, 0, 0, 0, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 1]), // 1
    pattern([1, 0, 1, 1, 1, 1, 0, 1, 0, 1, 1, 1, 1, 0, 1]), // 2
    pattern([1, 0, 1, 0, 1, 1, 0, 1, 0, 1, 1, 1, 1, 1, 1]), // 3
    pattern([1, 1, 1, 0, 0, 0, 0, 1, 0, 0, 1, 1, 1, 1, 1]), // 4
    pattern([1, 1, 1, 0, 1, 1, 0, 1, 0, 1, 1, 0, 1, 1, 1]), // 5
    pattern([1, 1, 1, 1, 1, 1, 0, 1, 0, 1, 1, 0, 1, 1, 1]), // 6
    pattern([1, 0, 0, 0, 0, 1, 0, 1, 1, 1, 1, 1, 0, 0, 0]), // 7
    pattern([1, 1, 1, 1, 1, 1, 0, 1, 0, 1, 1, 1, 1, 1, 1]), // 8
    pattern([1, 1, 1, 0, 1, 1, 0, 1, 0, 1, 1, 1, 1, 1, 1]), // 9
];

/// A decimal digit, 0 through 9.
///
/// Construction is the only place the 0-9 domain is checked, so
/// [`pattern_for`] is total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digit(u8);

impl Digit {
    pub fn new(value: u8) -> Option<Self> {
        (value <= 9).then_some(Self(value))
    }

    /// Parse an ASCII digit character such as `b'7'`.
    pub fn from_ascii(byte: u8) -> Option<Self> {
        byte.is_ascii_digit().then(|| Self(byte - b'0'))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

/// Look up the segment pattern for a digit.
pub fn pattern_for(digit: Digit) -> &'static GlyphPattern {
    &GLYPHS[digit.0 as usize]
}

/// Row and column of a segment position inside its glyph.
pub fn cell_of(position: usize) -> (usize, usize) {
    (position % GLYPH_ROWS, position / GLYPH_ROWS)
}
