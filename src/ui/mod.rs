pub mod style;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Stylize,
    text::{Line, Span},
    widgets::Widget,
};

use crate::app::App;
use crate::clock::scheduler::SchedulerState;
use crate::clock::Settings;
use crate::widgets::clock_face::ClockFaceWidget;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let running = self.engine.state() == SchedulerState::Running;
        ClockFaceWidget::new(self.engine.surface())
            .running(running)
            .status(status_line(self.engine.settings()))
            .render(area, buf);
    }
}

/// ` 30 fps · p pause · t theme · +/- fps · r reload · q quit `
pub fn status_line(settings: &Settings) -> Line<'static> {
    let rate = if settings.is_paused {
        Span::from("paused").bold()
    } else if settings.fps_cap > 0.0 {
        Span::from(format!("{} fps", settings.fps_cap))
    } else {
        Span::from("unlimited")
    };

    Line::from(vec![
        Span::from(" "),
        rate,
        Span::from(" · p pause · t theme · +/- fps · r reload · q quit ").dim(),
    ])
}
