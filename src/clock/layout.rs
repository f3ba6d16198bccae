// src/clock/layout.rs

//! Partition of the 60 segment handles into four glyph groups.

use crate::clock::glyph::SEGMENTS_PER_GLYPH;
use crate::clock::surface::{SegmentHandle, SEGMENT_COUNT};

/// Position of a glyph group on the clock face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupSlot {
    HoursTens,
    HoursUnits,
    MinutesTens,
    MinutesUnits,
}

impl GroupSlot {
    pub const ALL: [GroupSlot; 4] = [
        GroupSlot::HoursTens,
        GroupSlot::HoursUnits,
        GroupSlot::MinutesTens,
        GroupSlot::MinutesUnits,
    ];

    pub fn index(self) -> usize {
        match self {
            GroupSlot::HoursTens => 0,
            GroupSlot::HoursUnits => 1,
            GroupSlot::MinutesTens => 2,
            GroupSlot::MinutesUnits => 3,
        }
    }
}

/// The 15 ordered segment handles used to draw one digit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphGroup {
    handles: [SegmentHandle; SEGMENTS_PER_GLYPH],
}

impl GlyphGroup {
    pub fn handles(&self) -> &[SegmentHandle; SEGMENTS_PER_GLYPH] {
        &self.handles
    }
}

/// The four glyph groups, bound once at startup.
#[derive(Debug, Clone)]
pub struct DigitLayout {
    groups: [GlyphGroup; 4],
}

impl DigitLayout {
    pub fn new() -> Self {
        let groups = std::array::from_fn(|g| GlyphGroup {
            handles: std::array::from_fn(|i| SegmentHandle::new(g * SEGMENTS_PER_GLYPH + i)),
        });
        Self { groups }
    }

    pub fn group(&self, slot: GroupSlot) -> &GlyphGroup {
        &self.groups[slot.index()]
    }

    /// Which group and position a flat segment index belongs to.
    pub fn locate(index: usize) -> Option<(GroupSlot, usize)> {
        if index >= SEGMENT_COUNT {
            return None;
        }
        let slot = GroupSlot::ALL[index / SEGMENTS_PER_GLYPH];
        Some((slot, index % SEGMENTS_PER_GLYPH))
    }
}

impl Default for DigitLayout {
    fn default() -> Self {
        Self::new()
    }
}
