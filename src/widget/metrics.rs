//! Derived quantities of a planned-versus-actual progress bar.
//!
//! Everything here is plain arithmetic on the two input values and the
//! style. No function panics or returns a non-finite value for finite
//! inputs.

use super::style::{RgbColor, StyleConfig};

/// Ratio reported once the bar is complete or over plan.
///
/// This is a percent-scale value used as a fractional multiplier. The
/// fill width cap in the layout absorbs it, so the rendered bar is the
/// same as with a saturation of `1.0`.
pub const SATURATED_RATIO: f64 = 100.0;

/// Divisor applied to the corner radius for the fill's leading corners.
const SECONDARY_RADIUS_DIVISOR: f64 = 33.0;

/// Progress measured against a planned value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressMetrics {
    /// Target quantity
    pub planned: f64,
    /// Current quantity
    pub progress: f64,
}

impl ProgressMetrics {
    /// Create metrics for the given planned and progress values.
    pub fn new(planned: f64, progress: f64) -> Self {
        Self { planned, progress }
    }

    /// Fraction of the plan reached, or [`SATURATED_RATIO`] once complete.
    ///
    /// Saturates when the fraction exceeds 1, when progress equals the
    /// plan, and when the plan is zero.
    pub fn ratio(&self) -> f64 {
        if self.planned == 0.0 {
            return SATURATED_RATIO;
        }
        let ratio = self.progress / self.planned;
        if ratio > 1.0 || self.progress == self.planned {
            SATURATED_RATIO
        } else {
            ratio
        }
    }

    /// Whether [`ratio`](Self::ratio) is saturated.
    pub fn is_saturated(&self) -> bool {
        self.ratio() == SATURATED_RATIO
    }

    /// Progress in percent of the plan. Not clamped.
    ///
    /// `0.0` when both values are zero and `100.0` when only the plan is
    /// zero.
    pub fn percent(&self) -> f64 {
        if self.planned == 0.0 {
            return if self.progress == 0.0 { 0.0 } else { 100.0 };
        }
        self.progress / self.planned * 100.0
    }

    /// Remaining quantity; negative once over plan.
    pub fn rest(&self) -> f64 {
        self.planned - self.progress
    }

    /// Whether progress exceeds the plan.
    pub fn is_over(&self) -> bool {
        self.progress > self.planned
    }

    /// Color of the fill rectangle and its divider.
    pub fn fill_color(&self, style: &StyleConfig) -> RgbColor {
        if self.is_over() && style.flip_color_when_over {
            style.alert_color
        } else {
            style.progress_color
        }
    }

    /// Color of the remaining-value label, `None` for the label color.
    pub fn rest_alert(&self, style: &StyleConfig) -> Option<RgbColor> {
        if self.rest() >= 0.0 {
            None
        } else {
            Some(style.alert_color)
        }
    }

    /// Percentage label text, e.g. `40.00 %`.
    pub fn percent_label(&self) -> String {
        format!("{:.2} %", self.percent())
    }
}

/// Vertical space reserved for the labels around the bar.
pub fn text_row_height(style: &StyleConfig) -> f64 {
    style.bar_height + style.inner_padding * 5.0
}

/// Corner radius of the fill's leading corners.
pub fn secondary_corner_radius(style: &StyleConfig) -> f64 {
    style.corner_radius / SECONDARY_RADIUS_DIVISOR
}

/// Format a value the way the bar labels show it.
///
/// Integral values keep one decimal (`400.0`), others use the shortest
/// representation that round-trips.
pub fn value_label(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}
