// src/clock/scheduler.rs

//! Frame scheduler state machine with an optional FPS throttle.
//!
//! The host delivers frames; the scheduler decides per frame whether to stay
//! armed and whether this frame should render.

use std::time::Instant;

use crate::clock::settings::Settings;

/// Largest frame delta honoured, in seconds. Longer gaps (suspended
/// terminal, sleeping laptop) are treated as one second.
pub const MAX_FRAME_DELTA: f64 = 1.0;

/// Monotonic seconds since an arbitrary epoch.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    epoch: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { epoch: Instant::now() }
    }

    pub fn now_secs(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// No frame requested.
    Idle,
    /// A frame callback is pending.
    Running,
}

/// What the scheduler decided for one delivered frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameDecision {
    /// Frame arrived while idle; nothing to do.
    NotScheduled,
    /// Paused: the loop dropped to idle without rescheduling.
    Paused,
    /// Rescheduled, but the FPS cap says skip rendering this frame.
    Throttled,
    /// Rescheduled and this frame should render. Carries the clamped delta.
    Render { dt: f64 },
}

/// Elapsed-time accumulator used to honour an FPS cap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrottleAccumulator {
    last: f64,
    accumulated: f64,
}

impl ThrottleAccumulator {
    pub fn new(now: f64) -> Self {
        Self { last: now, accumulated: 0.0 }
    }

    /// Advance to `now` and return the clamped delta since the previous call.
    pub fn advance(&mut self, now: f64) -> f64 {
        let dt = (now - self.last).min(MAX_FRAME_DELTA);
        self.last = now;
        dt
    }

    /// Add `dt`; returns true once a full frame interval for `fps_cap` has
    /// accumulated, consuming that interval.
    pub fn admit(&mut self, dt: f64, fps_cap: f64) -> bool {
        let interval = 1.0 / fps_cap;
        self.accumulated += dt;
        if self.accumulated < interval {
            return false;
        }
        self.accumulated -= interval;
        true
    }

    pub fn accumulated(&self) -> f64 {
        self.accumulated
    }
}

#[derive(Debug, Clone)]
pub struct FrameScheduler {
    state: SchedulerState,
    throttle: ThrottleAccumulator,
}

impl FrameScheduler {
    /// New idle scheduler whose first delta is measured from `now`.
    pub fn new(now: f64) -> Self {
        Self {
            state: SchedulerState::Idle,
            throttle: ThrottleAccumulator::new(now),
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SchedulerState::Running
    }

    pub fn throttle(&self) -> &ThrottleAccumulator {
        &self.throttle
    }

    /// Arm the loop. Returns false if it was already running.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.state = SchedulerState::Running;
        true
    }

    /// Handle one delivered frame at monotonic time `now`.
    pub fn on_frame(&mut self, now: f64, settings: &Settings) -> FrameDecision {
        if !self.is_running() {
            return FrameDecision::NotScheduled;
        }

        if settings.is_paused {
            self.state = SchedulerState::Idle;
            return FrameDecision::Paused;
        }

        // stays Running: the next frame is already requested
        let dt = self.throttle.advance(now);
        tracing::trace!(dt, fps_cap = settings.fps_cap, "frame");

        if settings.fps_cap > 0.0 && !self.throttle.admit(dt, settings.fps_cap) {
            return FrameDecision::Throttled;
        }

        FrameDecision::Render { dt }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(fps_cap: f64) -> Settings {
        Settings {
            fps_cap,
            ..Settings::default()
        }
    }

    #[test]
    fn test_idle_until_started() {
        let mut scheduler = FrameScheduler::new(0.0);
        assert_eq!(scheduler.state(), SchedulerState::Idle);
        assert_eq!(scheduler.on_frame(0.1, &settings(0.0)), FrameDecision::NotScheduled);

        assert!(scheduler.start());
        assert!(!scheduler.start());
        assert_eq!(scheduler.state(), SchedulerState::Running);
    }

    #[test]
    fn test_unlimited_renders_every_frame() {
        let mut scheduler = FrameScheduler::new(0.0);
        scheduler.start();
        for i in 1..=10 {
            let decision = scheduler.on_frame(i as f64 * 0.016, &settings(0.0));
            assert!(matches!(decision, FrameDecision::Render { .. }));
        }
    }

    #[test]
    fn test_pause_drops_out_of_loop() {
        let mut scheduler = FrameScheduler::new(0.0);
        scheduler.start();
        let paused = Settings {
            is_paused: true,
            ..Settings::default()
        };
        assert_eq!(scheduler.on_frame(0.1, &paused), FrameDecision::Paused);
        assert_eq!(scheduler.state(), SchedulerState::Idle);
        assert_eq!(scheduler.on_frame(0.2, &settings(0.0)), FrameDecision::NotScheduled);

        assert!(scheduler.start());
        assert!(matches!(
            scheduler.on_frame(0.3, &settings(0.0)),
            FrameDecision::Render { .. }
        ));
    }

    #[test]
    fn test_dt_is_clamped() {
        let mut scheduler = FrameScheduler::new(0.0);
        scheduler.start();
        scheduler.on_frame(1.0, &settings(0.0));
        assert_eq!(
            scheduler.on_frame(51.0, &settings(0.0)),
            FrameDecision::Render { dt: MAX_FRAME_DELTA }
        );
    }

    #[test]
    fn test_throttle_at_ten_fps() {
        let mut scheduler = FrameScheduler::new(0.0);
        scheduler.start();
        let cap = settings(10.0);

        let mut renders = Vec::new();
        for tick in 1..=30 {
            let now = tick as f64 * 0.03;
            if let FrameDecision::Render { .. } = scheduler.on_frame(now, &cap) {
                renders.push(tick);
            }
            assert!(scheduler.throttle().accumulated() < 0.1 + 1e-9);
        }

        // 0.9s of frames at a 0.1s interval
        assert!((8..=9).contains(&renders.len()), "renders: {:?}", renders);
        for pair in renders.windows(2) {
            assert!((3..=4).contains(&(pair[1] - pair[0])), "renders: {:?}", renders);
        }
    }

    #[test]
    fn test_accumulator_admit() {
        let mut acc = ThrottleAccumulator::new(0.0);
        assert!(!acc.admit(0.05, 10.0));
        assert!(acc.admit(0.06, 10.0));
        assert!((acc.accumulated() - 0.01).abs() < 1e-9);
    }
}
