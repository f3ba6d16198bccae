pub mod app;
pub mod clock;
pub mod config;
pub mod error;
pub mod event;
pub mod ui;
pub mod util;
pub mod widgets;

pub use app::App;
pub use clock::{ClockEngine, ConfigSink, DisplaySurface, FrameOutcome, Settings};
pub use config::ClockConfig;
pub use error::{ClockError, Result};
