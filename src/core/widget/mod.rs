//! Per-button polling and rendering.
//!
//! Each visible button gets its own timer-driven task that reads one
//! statistic, renders it, and pushes image and title to the host.

mod controller;
mod settings;
pub mod tick;

pub use controller::WidgetController;
pub use settings::{Selection, WidgetSettings};
pub use tick::{collect_frame, fetch_reading, push_frame, Frame, PLACEHOLDER_TITLE};
