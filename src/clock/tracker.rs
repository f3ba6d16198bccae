// src/clock/tracker.rs

//! Change-diff tracker: remembers what was last drawn and only touches the
//! surface for fields whose string changed.

use crate::clock::glyph::Digit;
use crate::clock::layout::{DigitLayout, GroupSlot};
use crate::clock::renderer::apply_digit;
use crate::clock::sampler::TimeSample;
use crate::clock::surface::{DisplaySurface, SecondMarker};
use crate::log_warn;

/// Which time fields were redrawn during one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldChanges {
    pub seconds: bool,
    pub minutes: bool,
    pub hours: bool,
}

impl FieldChanges {
    pub fn any(&self) -> bool {
        self.seconds || self.minutes || self.hours
    }
}

/// Last rendered hours/minutes/seconds and the highlighted marker.
#[derive(Debug, Clone, Default)]
pub struct RenderedTimeState {
    last_seconds: String,
    last_minutes: String,
    last_hours: String,
    highlighted: Option<SecondMarker>,
}

impl RenderedTimeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn highlighted(&self) -> Option<SecondMarker> {
        self.highlighted
    }

    pub fn last_rendered(&self) -> (&str, &str, &str) {
        (&self.last_hours, &self.last_minutes, &self.last_seconds)
    }

    /// Bring the surface in line with `sample`, redrawing only changed fields.
    pub fn update<S: DisplaySurface + ?Sized>(
        &mut self,
        sample: &TimeSample,
        layout: &DigitLayout,
        surface: &mut S,
    ) -> FieldChanges {
        let mut changes = FieldChanges::default();

        if sample.seconds != self.last_seconds {
            changes.seconds = self.move_marker(&sample.seconds, surface);
        }

        if sample.minutes != self.last_minutes {
            changes.minutes = render_field(
                &sample.minutes,
                [GroupSlot::MinutesTens, GroupSlot::MinutesUnits],
                layout,
                surface,
            );
            if changes.minutes {
                self.last_minutes.clone_from(&sample.minutes);
            }
        }

        if sample.hours != self.last_hours {
            changes.hours = render_field(
                &sample.hours,
                [GroupSlot::HoursTens, GroupSlot::HoursUnits],
                layout,
                surface,
            );
            if changes.hours {
                self.last_hours.clone_from(&sample.hours);
            }
        }

        changes
    }

    /// Highlight the marker for `seconds`, then clear the previous one.
    fn move_marker<S: DisplaySurface + ?Sized>(&mut self, seconds: &str, surface: &mut S) -> bool {
        let Some(marker) = SecondMarker::from_seconds_str(seconds) else {
            log_warn!("Skipping seconds update, '{}' is not a second of the minute", seconds);
            return false;
        };

        surface.set_marker(marker, true);
        if let Some(previous) = self.highlighted.filter(|&prev| prev != marker) {
            surface.set_marker(previous, false);
        }

        self.highlighted = Some(marker);
        self.last_seconds = seconds.to_string();
        true
    }
}

/// Draw a two digit field across its tens and units groups.
///
/// A field that is not exactly two ASCII digits is left untouched.
fn render_field<S: DisplaySurface + ?Sized>(
    field: &str,
    slots: [GroupSlot; 2],
    layout: &DigitLayout,
    surface: &mut S,
) -> bool {
    let digits = match field.as_bytes() {
        [tens, units] => Digit::from_ascii(*tens).zip(Digit::from_ascii(*units)),
        _ => None,
    };
    let Some((tens, units)) = digits else {
        log_warn!("Skipping field update, '{}' is not a two digit number", field);
        return false;
    };

    apply_digit(surface, layout.group(slots[0]), tens);
    apply_digit(surface, layout.group(slots[1]), units);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::glyph::pattern_for;
    use crate::clock::surface::{SegmentHandle, MARKER_COUNT, SEGMENT_COUNT};

    #[derive(Default)]
    struct Probe {
        segments: Vec<bool>,
        markers: Vec<bool>,
        segment_writes: usize,
        marker_writes: usize,
    }

    impl Probe {
        fn new() -> Self {
            Self {
                segments: vec![false; SEGMENT_COUNT],
                markers: vec![false; MARKER_COUNT],
                ..Default::default()
            }
        }
    }

    impl DisplaySurface for Probe {
        fn set_segment(&mut self, handle: SegmentHandle, active: bool) {
            self.segments[handle.index()] = active;
            self.segment_writes += 1;
        }
        fn set_marker(&mut self, marker: SecondMarker, highlighted: bool) {
            self.markers[marker.index()] = highlighted;
            self.marker_writes += 1;
        }
        fn set_light_theme(&mut self, _enabled: bool) {}
        fn set_highlight_color(&mut self, _color: &str) {}
    }

    fn sample(h: &str, m: &str, s: &str) -> TimeSample {
        TimeSample {
            hours: h.into(),
            minutes: m.into(),
            seconds: s.into(),
        }
    }

    #[test]
    fn test_first_update_draws_everything() {
        let layout = DigitLayout::new();
        let mut probe = Probe::new();
        let mut state = RenderedTimeState::new();

        let changes = state.update(&sample("13", "07", "45"), &layout, &mut probe);

        assert_eq!(changes, FieldChanges { seconds: true, minutes: true, hours: true });
        assert_eq!(probe.segment_writes, 60);
        assert_eq!(probe.marker_writes, 1);
        assert!(probe.markers[45]);
        assert_eq!(&probe.segments[15..30], pattern_for(Digit::new(3).unwrap()));
        assert_eq!(state.last_rendered(), ("13", "07", "45"));
    }

    #[test]
    fn test_unchanged_sample_writes_nothing() {
        let layout = DigitLayout::new();
        let mut probe = Probe::new();
        let mut state = RenderedTimeState::new();
        state.update(&sample("13", "07", "45"), &layout, &mut probe);
        let (segments, markers) = (probe.segment_writes, probe.marker_writes);

        let changes = state.update(&sample("13", "07", "45"), &layout, &mut probe);

        assert!(!changes.any());
        assert_eq!(probe.segment_writes, segments);
        assert_eq!(probe.marker_writes, markers);
    }

    #[test]
    fn test_seconds_tick_moves_marker_only() {
        let layout = DigitLayout::new();
        let mut probe = Probe::new();
        let mut state = RenderedTimeState::new();
        state.update(&sample("13", "07", "45"), &layout, &mut probe);
        let segments = probe.segment_writes;

        let changes = state.update(&sample("13", "07", "46"), &layout, &mut probe);

        assert_eq!(changes, FieldChanges { seconds: true, minutes: false, hours: false });
        assert_eq!(probe.segment_writes, segments);
        assert!(!probe.markers[45]);
        assert!(probe.markers[46]);
        assert_eq!(state.highlighted().map(SecondMarker::index), Some(46));
    }

    #[test]
    fn test_minute_rollover_redraws_minutes_only() {
        let layout = DigitLayout::new();
        let mut probe = Probe::new();
        let mut state = RenderedTimeState::new();
        state.update(&sample("13", "07", "59"), &layout, &mut probe);
        let segments = probe.segment_writes;

        let changes = state.update(&sample("13", "08", "00"), &layout, &mut probe);

        assert_eq!(changes, FieldChanges { seconds: true, minutes: true, hours: false });
        assert_eq!(probe.segment_writes - segments, 30);
        assert!(probe.markers[0]);
        assert!(!probe.markers[59]);
    }

    #[test]
    fn test_malformed_field_is_skipped_and_retried() {
        let layout = DigitLayout::new();
        let mut probe = Probe::new();
        let mut state = RenderedTimeState::new();

        let changes = state.update(&sample("1x", "07", "99"), &layout, &mut probe);
        assert_eq!(changes, FieldChanges { seconds: false, minutes: true, hours: false });
        assert_eq!(state.last_rendered(), ("", "07", ""));
        assert!(state.highlighted().is_none());

        let changes = state.update(&sample("13", "07", "10"), &layout, &mut probe);
        assert_eq!(changes, FieldChanges { seconds: true, minutes: false, hours: true });
    }
}
