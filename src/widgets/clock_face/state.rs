// src/widgets/clock_face/state.rs
use crate::clock::settings::DEFAULT_HIGHLIGHT_COLOR;
use crate::clock::surface::{DisplaySurface, SecondMarker, SegmentHandle, SEGMENT_COUNT};

/// One block on the clock face. Blocks double as glyph segments and
/// second markers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockState {
    pub active: bool,
    pub highlighted: bool,
}

/// In-memory display surface drawn by [`super::ClockFaceWidget`].
#[derive(Debug, Clone)]
pub struct BlockGrid {
    blocks: [BlockState; SEGMENT_COUNT],
    light_theme: bool,
    highlight_color: String,
    writes: u64,
}

impl BlockGrid {
    pub fn new() -> Self {
        Self {
            blocks: [BlockState::default(); SEGMENT_COUNT],
            light_theme: false,
            highlight_color: DEFAULT_HIGHLIGHT_COLOR.to_string(),
            writes: 0,
        }
    }

    pub fn blocks(&self) -> &[BlockState; SEGMENT_COUNT] {
        &self.blocks
    }

    pub fn block(&self, index: usize) -> Option<BlockState> {
        self.blocks.get(index).copied()
    }

    pub fn is_light_theme(&self) -> bool {
        self.light_theme
    }

    pub fn highlight_color(&self) -> &str {
        &self.highlight_color
    }

    /// Count of writes that actually changed something. Hosts compare this
    /// across a frame to decide whether to repaint.
    pub fn writes(&self) -> u64 {
        self.writes
    }

    pub fn highlighted(&self) -> impl Iterator<Item = usize> + '_ {
        self.blocks
            .iter()
            .enumerate()
            .filter(|(_, b)| b.highlighted)
            .map(|(i, _)| i)
    }

    fn touch(&mut self, changed: bool) {
        if changed {
            self.writes += 1;
        }
    }
}

impl Default for BlockGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySurface for BlockGrid {
    fn set_segment(&mut self, handle: SegmentHandle, active: bool) {
        let block = &mut self.blocks[handle.index()];
        let changed = block.active != active;
        block.active = active;
        self.touch(changed);
    }

    fn set_marker(&mut self, marker: SecondMarker, highlighted: bool) {
        let block = &mut self.blocks[marker.index()];
        let changed = block.highlighted != highlighted;
        block.highlighted = highlighted;
        self.touch(changed);
    }

    fn set_light_theme(&mut self, enabled: bool) {
        let changed = self.light_theme != enabled;
        self.light_theme = enabled;
        self.touch(changed);
    }

    fn set_highlight_color(&mut self, color: &str) {
        let changed = self.highlight_color != color;
        if changed {
            self.highlight_color = color.to_string();
        }
        self.touch(changed);
    }
}
