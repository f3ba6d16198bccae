// src/clock/renderer.rs

use crate::clock::glyph::{pattern_for, Digit};
use crate::clock::layout::GlyphGroup;
use crate::clock::surface::DisplaySurface;

/// Set every segment of `group` to the pattern for `digit`.
pub fn apply_digit<S: DisplaySurface + ?Sized>(surface: &mut S, group: &GlyphGroup, digit: Digit) {
    let pattern = pattern_for(digit);
    for (handle, &active) in group.handles().iter().zip(pattern.iter()) {
        surface.set_segment(*handle, active);
    }
}
