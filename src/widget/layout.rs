//! Pure layout of the progress bar.
//!
//! Computes the geometry of every element from the container width, the
//! style, the metrics and the label sizes measured on the previous pass.
//! Coordinates are logical units relative to the widget's top-left
//! corner; labels above the bar have negative `y`.

use super::measure::LabelSizes;
use super::metrics::{secondary_corner_radius, text_row_height, ProgressMetrics};
use super::style::StyleConfig;

/// Offset from the widget top to the top edge of the track.
pub const BAR_TOP: f64 = 20.0;

/// Offset of the track's drop shadow, down and to the right.
pub const SHADOW_OFFSET: f64 = 2.0;

/// A positioned rectangle in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Where a label starts. Labels size themselves, so only the origin is
/// laid out.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Anchor {
    pub x: f64,
    pub y: f64,
}

/// Geometry of one render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarLayout {
    /// Background track
    pub track: Bounds,
    /// Corner radius of the track
    pub track_radius: f64,
    /// Drop shadow behind the track
    pub track_shadow: Bounds,
    /// Filled part of the bar
    pub fill: Bounds,
    /// Radius of the fill's leading corners; trailing corners are square
    pub fill_leading_radius: f64,
    /// Current value label
    pub progress_label: Anchor,
    /// Percentage label
    pub percent_label: Anchor,
    /// Remaining value label
    pub rest_label: Anchor,
    /// Planned value label
    pub planned_label: Anchor,
    /// Divider after the end of the fill
    pub progress_divider: Bounds,
    /// Divider near the planned label
    pub planned_divider: Bounds,
}

/// Fill width for a container of `width` with `rest_width` reserved for
/// the trailing label.
///
/// The proportional width is reduced by the same ratio of the reserved
/// slot, then capped so it never runs past the slot and the padding.
pub fn fill_width(ratio: f64, width: f64, rest_width: f64, padding: f64) -> f64 {
    let proportional = ratio * width - rest_width * ratio;
    let cap = width - rest_width - padding * 2.0;
    proportional.min(cap)
}

/// Lay out the bar for a container `width` using `sizes` from the last
/// measurement.
pub fn compute(
    width: f64,
    style: &StyleConfig,
    metrics: &ProgressMetrics,
    sizes: &LabelSizes,
) -> BarLayout {
    let pad = style.inner_padding;
    let line = style.divider_width;
    let rest_w = sizes.rest.width;
    let rows = text_row_height(style);

    let fill = fill_width(metrics.ratio(), width, rest_w, pad);

    // padding relative to divider width; no divider means no offset
    let divider_inset = if line == 0.0 { 0.0 } else { pad / line };

    let track = Bounds::new(0.0, BAR_TOP, width - rest_w, style.bar_height);

    BarLayout {
        track,
        track_radius: style.corner_radius,
        track_shadow: Bounds::new(
            track.x + SHADOW_OFFSET,
            track.y + SHADOW_OFFSET,
            track.width,
            track.height,
        ),
        fill: Bounds::new(pad, BAR_TOP + pad, fill, style.bar_height - pad * 2.0),
        fill_leading_radius: secondary_corner_radius(style),
        progress_label: Anchor {
            x: fill - sizes.progress.width,
            y: -pad,
        },
        percent_label: Anchor {
            x: fill + pad * 2.0,
            y: -pad,
        },
        rest_label: Anchor {
            x: width - rest_w,
            y: BAR_TOP,
        },
        planned_label: Anchor {
            x: width - sizes.planned.width - pad - rest_w,
            y: rows + pad,
        },
        progress_divider: Bounds::new(fill + line, -pad, line, rows),
        planned_divider: Bounds::new(
            width - divider_inset - rest_w,
            BAR_TOP + pad + line,
            line,
            rows,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::measure::Size;

    fn sizes(rest: f64) -> LabelSizes {
        LabelSizes {
            planned: Size::new(6.0, 1.0),
            progress: Size::new(5.0, 1.0),
            rest: Size::new(rest, 1.0),
        }
    }

    #[test]
    fn test_fill_width_proportional() {
        // 0.4 * 100 - 10 * 0.4 = 36, cap = 100 - 10 - 8 = 82
        assert!((fill_width(0.4, 100.0, 10.0, 4.0) - 36.0).abs() < 1e-9);
    }

    #[test]
    fn test_fill_width_capped_when_saturated() {
        let w = fill_width(crate::widget::SATURATED_RATIO, 100.0, 10.0, 4.0);
        assert!((w - 82.0).abs() < 1e-9);
    }

    #[test]
    fn test_track_reserves_rest_slot() {
        let style = StyleConfig::default();
        let metrics = ProgressMetrics::new(1000.0, 400.0);
        let layout = compute(80.0, &style, &metrics, &sizes(5.0));
        assert_eq!(layout.track, Bounds::new(0.0, BAR_TOP, 75.0, 20.0));
        assert_eq!(layout.rest_label, Anchor { x: 75.0, y: BAR_TOP });
        assert!((layout.track_radius - 6.0).abs() < 1e-9);
        assert_eq!(layout.track_shadow, Bounds::new(2.0, 22.0, 75.0, 20.0));
    }

    #[test]
    fn test_labels_follow_fill_end() {
        let style = StyleConfig::default();
        let metrics = ProgressMetrics::new(1000.0, 400.0);
        let layout = compute(80.0, &style, &metrics, &sizes(5.0));
        let fill = layout.fill.width;
        assert!((fill - 30.0).abs() < 1e-9);
        assert!((layout.progress_label.x - 25.0).abs() < 1e-9);
        assert!((layout.percent_label.x - 38.0).abs() < 1e-9);
        assert!((layout.progress_divider.x - 32.0).abs() < 1e-9);
        assert!((layout.progress_label.y + 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_planned_elements() {
        let style = StyleConfig::default();
        let metrics = ProgressMetrics::new(1000.0, 400.0);
        let layout = compute(80.0, &style, &metrics, &sizes(5.0));
        // 80 - 6 - 4 - 5
        assert!((layout.planned_label.x - 65.0).abs() < 1e-9);
        assert!((layout.planned_label.y - 44.0).abs() < 1e-9);
        // 80 - 4 / 2 - 5
        assert!((layout.planned_divider.x - 73.0).abs() < 1e-9);
        assert!((layout.planned_divider.y - 26.0).abs() < 1e-9);
        assert!((layout.planned_divider.height - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_divider_width_has_no_inset() {
        let style = StyleConfig::default().with_divider_width(0.0);
        let metrics = ProgressMetrics::new(1000.0, 400.0);
        let layout = compute(80.0, &style, &metrics, &sizes(5.0));
        assert!((layout.planned_divider.x - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_fill_monotonic_below_plan() {
        let style = StyleConfig::default();
        let s = sizes(5.0);
        let mut last = f64::NEG_INFINITY;
        for step in 0..100 {
            let metrics = ProgressMetrics::new(1000.0, step as f64 * 10.0);
            let layout = compute(120.0, &style, &metrics, &s);
            assert!(layout.fill.width >= last);
            last = layout.fill.width;
        }
    }

    #[test]
    fn test_zero_plan_layout_is_finite() {
        let style = StyleConfig::default();
        for progress in [-5.0, 0.0, 5.0] {
            let metrics = ProgressMetrics::new(0.0, progress);
            let layout = compute(60.0, &style, &metrics, &sizes(4.0));
            assert!(layout.fill.width.is_finite());
            assert!(layout.progress_divider.x.is_finite());
        }
    }

    #[test]
    fn test_fill_geometry() {
        let style = StyleConfig::default();
        let metrics = ProgressMetrics::new(1000.0, 400.0);
        let layout = compute(80.0, &style, &metrics, &sizes(5.0));
        assert!((layout.fill.x - 4.0).abs() < 1e-9);
        assert!((layout.fill.y - 24.0).abs() < 1e-9);
        assert!((layout.fill.height - 12.0).abs() < 1e-9);
        assert!((layout.fill_leading_radius - 6.0 / 33.0).abs() < 1e-9);
    }
}
