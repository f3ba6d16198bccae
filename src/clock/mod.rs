// src/clock/mod.rs

//! Clock core: glyph table, renderer, diff tracker and frame scheduler.
//! Nothing in here knows about the terminal.

pub mod engine;
pub mod glyph;
pub mod layout;
pub mod renderer;
pub mod sampler;
pub mod scheduler;
pub mod settings;
pub mod surface;
pub mod tracker;

pub use engine::{ClockEngine, FrameOutcome};
pub use settings::{ConfigSink, GeneralProperties, PropertyPush, Settings, UserProperties};
pub use surface::DisplaySurface;
