// src/clock/surface.rs

//! The display surface the core draws on. The host owns the actual
//! segments and markers; the core only flips their state.

use std::fmt;

/// Total number of segment handles across all four glyph groups.
pub const SEGMENT_COUNT: usize = 60;

/// Number of second markers, one per second of the minute.
pub const MARKER_COUNT: usize = 60;

/// Opaque reference to one renderable glyph segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentHandle(usize);

impl SegmentHandle {
    pub(crate) fn new(index: usize) -> Self {
        debug_assert!(index < SEGMENT_COUNT);
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// One of the 60 second markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SecondMarker(u8);

impl SecondMarker {
    pub fn new(second: u8) -> Option<Self> {
        ((second as usize) < MARKER_COUNT).then_some(Self(second))
    }

    /// Marker for a two character seconds string such as `"07"`.
    pub fn from_seconds_str(seconds: &str) -> Option<Self> {
        seconds.parse::<u8>().ok().and_then(Self::new)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SecondMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// Host display surface.
///
/// Every setter must be idempotent: writing the state a handle already has
/// leaves the surface unchanged.
pub trait DisplaySurface {
    fn set_segment(&mut self, handle: SegmentHandle, active: bool);

    fn set_marker(&mut self, marker: SecondMarker, highlighted: bool);

    /// Toggle the light display-mode flag.
    fn set_light_theme(&mut self, enabled: bool);

    /// Set the accent color variable, e.g. `rgb(245,125,0)` or `#f57c00`.
    fn set_highlight_color(&mut self, color: &str);
}
