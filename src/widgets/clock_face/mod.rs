pub mod state;
pub mod widget;

pub use state::{BlockGrid, BlockState};
pub use widget::ClockFaceWidget;
