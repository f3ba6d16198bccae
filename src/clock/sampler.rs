// src/clock/sampler.rs

//! Reads local wall-clock time and turns it into zero-padded strings.

use chrono::{Local, NaiveTime, Timelike};

/// Source of local wall-clock time.
pub trait WallClock {
    fn now(&self) -> NaiveTime;
}

/// The system's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl WallClock for LocalClock {
    fn now(&self) -> NaiveTime {
        Local::now().time()
    }
}

/// Hours, minutes and seconds as two character decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TimeSample {
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

impl TimeSample {
    pub fn from_time(time: NaiveTime) -> Self {
        Self {
            hours: pad_with_zero(&time.hour().to_string()),
            minutes: pad_with_zero(&time.minute().to_string()),
            seconds: pad_with_zero(&time.second().to_string()),
        }
    }
}

/// Sample the clock now.
pub fn sample_now<C: WallClock + ?Sized>(clock: &C) -> TimeSample {
    TimeSample::from_time(clock.now())
}

/// Prefix a single character number with `0`; longer input passes through.
pub fn pad_with_zero(number: &str) -> String {
    if number.len() == 1 {
        format!("0{}", number)
    } else {
        number.to_string()
    }
}
