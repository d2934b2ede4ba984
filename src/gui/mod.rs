//! Terminal front ends: the live monitor, its gauge widget and a device
//! picker.

mod device_selector;
mod error;
mod gauge_widget;
mod monitor;

pub use device_selector::device_selector;
pub use error::QuadrantGuiError;
pub use gauge_widget::GaugeWidget;
pub use monitor::engage_monitor;
