//! Planned-versus-actual progress bar.
//!
//! - [`metrics`]: ratio, percentage and remaining value
//! - [`layout`]: pure geometry from width, style and label sizes
//! - [`measure`]: label measurement and the size cache
//! - [`progress_bar`]: the ratatui widget

pub mod layout;
pub mod measure;
pub mod metrics;
pub mod progress_bar;
pub mod style;

pub use layout::{BarLayout, Bounds, BAR_TOP, SHADOW_OFFSET};
pub use measure::{CellMeasure, LabelSizes, Size, TextMeasure};
pub use metrics::{value_label, ProgressMetrics, SATURATED_RATIO};
pub use progress_bar::{ProgressBarState, ProgressBarValue, BAR_ROWS};
pub use style::{RgbColor, StyleConfig};
