// src/widgets/clock_face/widget.rs
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Style, Stylize},
    text::Line,
    widgets::{Block, BorderType, Widget},
};

use crate::clock::glyph::{cell_of, GLYPH_COLUMNS, GLYPH_ROWS};
use crate::clock::layout::DigitLayout;
use crate::ui::style::{dim_unless_running, highlight_or_default, Palette};
use crate::widgets::clock_face::state::{BlockGrid, BlockState};

/// Terminal cells per block horizontally; cells are roughly twice as tall
/// as they are wide.
const BLOCK_WIDTH: u16 = 2;
const DIGIT_GAP: u16 = 2;
/// Extra space between the hour and minute pairs.
const PAIR_GAP: u16 = 4;

const GLYPH_WIDTH: u16 = GLYPH_COLUMNS as u16 * BLOCK_WIDTH;
pub const FACE_WIDTH: u16 = 4 * GLYPH_WIDTH + 3 * DIGIT_GAP + PAIR_GAP;
pub const FACE_HEIGHT: u16 = GLYPH_ROWS as u16;

/// Draws the four glyph groups of a [`BlockGrid`].
pub struct ClockFaceWidget<'a> {
    grid: &'a BlockGrid,
    status: Option<Line<'a>>,
    running: bool,
}

impl<'a> ClockFaceWidget<'a> {
    pub fn new(grid: &'a BlockGrid) -> Self {
        Self {
            grid,
            status: None,
            running: true,
        }
    }

    /// Status line drawn along the bottom border.
    pub fn status(mut self, status: Line<'a>) -> Self {
        self.status = Some(status);
        self
    }

    pub fn running(mut self, running: bool) -> Self {
        self.running = running;
        self
    }

    fn block_color(&self, block: BlockState, palette: &Palette) -> ratatui::style::Color {
        if block.highlighted {
            highlight_or_default(self.grid.highlight_color())
        } else if block.active {
            palette.active
        } else {
            palette.inactive
        }
    }
}

/// Left edge of glyph group `group` relative to the face origin.
fn group_offset(group: usize) -> u16 {
    let group = group as u16;
    let pair_gap = if group >= 2 { PAIR_GAP } else { 0 };
    group * (GLYPH_WIDTH + DIGIT_GAP) + pair_gap
}

impl Widget for ClockFaceWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let palette = Palette::for_theme(self.grid.is_light_theme());
        let border_style = dim_unless_running(self.running, Style::default().fg(palette.text));

        let mut frame = Block::bordered()
            .border_type(BorderType::Rounded)
            .style(Style::default().bg(palette.background))
            .border_style(border_style)
            .title(Line::from(" glyph-clock ").bold());
        if let Some(status) = self.status.clone() {
            frame = frame.title_bottom(status.alignment(Alignment::Right));
        }
        let inner = frame.inner(area);
        frame.render(area, buf);

        if inner.width < FACE_WIDTH || inner.height < FACE_HEIGHT {
            Line::from("enlarge the terminal")
                .fg(palette.text)
                .alignment(Alignment::Center)
                .render(inner, buf);
            return;
        }

        let origin_x = inner.x + (inner.width - FACE_WIDTH) / 2;
        let origin_y = inner.y + (inner.height - FACE_HEIGHT) / 2;

        for (index, &block) in self.grid.blocks().iter().enumerate() {
            let Some((slot, position)) = DigitLayout::locate(index) else {
                continue;
            };
            let (row, column) = cell_of(position);
            let color = self.block_color(block, &palette);

            let x = origin_x + group_offset(slot.index()) + column as u16 * BLOCK_WIDTH;
            let y = origin_y + row as u16;
            for dx in 0..BLOCK_WIDTH {
                if let Some(cell) = buf.cell_mut((x + dx, y)) {
                    cell.set_symbol(" ").set_bg(color);
                }
            }
        }
    }
}
