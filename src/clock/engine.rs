// src/clock/engine.rs

//! The clock context object: settings, scheduler, tracker, layout, surface
//! and wall clock threaded together behind one owner.

use crate::clock::layout::DigitLayout;
use crate::clock::sampler::{sample_now, WallClock};
use crate::clock::scheduler::{FrameDecision, FrameScheduler, SchedulerState};
use crate::clock::settings::{
    fps_cap_from, scheme_color_to_css, ConfigSink, GeneralProperties, Settings, UserProperties,
};
use crate::clock::surface::DisplaySurface;
use crate::clock::tracker::{FieldChanges, RenderedTimeState};
use crate::{log_debug, log_info};

/// Result of one frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Delivered while idle and ignored.
    NotScheduled,
    /// Paused; the loop is no longer requesting frames.
    Paused,
    /// Skipped by the FPS cap.
    Throttled,
    /// The time was sampled and these fields were redrawn.
    Rendered(FieldChanges),
}

pub struct ClockEngine<S, C> {
    settings: Settings,
    scheduler: FrameScheduler,
    rendered: RenderedTimeState,
    layout: DigitLayout,
    surface: S,
    clock: C,
}

impl<S: DisplaySurface, C: WallClock> ClockEngine<S, C> {
    /// Build an idle engine. `now` is the monotonic time the first frame
    /// delta is measured from.
    pub fn new(settings: Settings, surface: S, clock: C, now: f64) -> Self {
        Self {
            settings,
            scheduler: FrameScheduler::new(now),
            rendered: RenderedTimeState::new(),
            layout: DigitLayout::new(),
            surface,
            clock,
        }
    }

    /// Push the current theme and accent color onto the surface.
    pub fn apply_theme(&mut self) {
        self.surface.set_light_theme(self.settings.is_light_theme);
        self.surface.set_highlight_color(&self.settings.highlight_color);
    }

    /// Arm the frame loop. No-op when already running.
    pub fn start(&mut self) {
        if self.scheduler.start() {
            log_debug!("Frame loop armed");
        }
    }

    /// Whether the host should deliver another frame.
    pub fn wants_frame(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn state(&self) -> SchedulerState {
        self.scheduler.state()
    }

    /// Frame callback at monotonic time `now` (seconds).
    pub fn on_frame(&mut self, now: f64) -> FrameOutcome {
        match self.scheduler.on_frame(now, &self.settings) {
            FrameDecision::NotScheduled => FrameOutcome::NotScheduled,
            FrameDecision::Paused => {
                log_debug!("Frame loop stopped while paused");
                FrameOutcome::Paused
            }
            FrameDecision::Throttled => FrameOutcome::Throttled,
            FrameDecision::Render { .. } => {
                let sample = sample_now(&self.clock);
                let changes = self.rendered.update(&sample, &self.layout, &mut self.surface);
                if changes.any() {
                    tracing::trace!(?changes, time = ?sample, "rendered");
                }
                FrameOutcome::Rendered(changes)
            }
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn rendered(&self) -> &RenderedTimeState {
        &self.rendered
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn set_light_theme(&mut self, enabled: bool) {
        self.settings.is_light_theme = enabled;
        self.surface.set_light_theme(enabled);
    }

    fn set_highlight_color(&mut self, color: String) {
        self.surface.set_highlight_color(&color);
        self.settings.highlight_color = color;
    }
}

impl<S: DisplaySurface, C: WallClock> ConfigSink for ClockEngine<S, C> {
    fn on_pause(&mut self, paused: bool) {
        log_info!("Pause set to {}", paused);
        self.settings.is_paused = paused;
        if !paused {
            self.start();
        }
    }

    fn on_general_properties(&mut self, properties: &GeneralProperties) {
        if let Some(fps) = properties.fps.and_then(fps_cap_from) {
            log_info!("FPS cap set to {}", fps);
            self.settings.fps_cap = fps;
        }
    }

    fn on_user_properties(&mut self, properties: &UserProperties) {
        if let Some(light) = &properties.islighttheme {
            self.set_light_theme(light.value);
        }

        if let Some(scheme) = &properties.schemecolor {
            if let Some(color) = scheme_color_to_css(&scheme.value) {
                log_info!("Highlight color set to {}", color);
                self.set_highlight_color(color);
            }
        }
    }
}
