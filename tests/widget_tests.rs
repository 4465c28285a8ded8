//! Rendering tests for the progress bar widget
//!
//! These tests render the widget into a ratatui buffer and check the
//! scenarios a planned-versus-actual bar has to get right.

use planbar::widget::{
    layout, CellMeasure, LabelSizes, ProgressBarState, ProgressBarValue, ProgressMetrics, RgbColor,
    Size, StyleConfig, TextMeasure, SATURATED_RATIO,
};
use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::StatefulWidget};

const WIDTH: u16 = 60;

/// Render until the label sizes settle, returning the buffer and the
/// number of passes it took.
fn settle<M: TextMeasure + Clone>(bar: ProgressBarValue<M>) -> (Buffer, usize) {
    let area = Rect::new(0, 0, WIDTH, 3);
    let mut state = ProgressBarState::new();
    let mut passes = 0;
    loop {
        let mut buf = Buffer::empty(area);
        bar.clone().render(area, &mut buf, &mut state);
        passes += 1;
        if !state.take_redraw() || passes > 5 {
            return (buf, passes);
        }
    }
}

fn row(buf: &Buffer, y: u16) -> String {
    (0..buf.area.width)
        .map(|x| buf[(x, y)].symbol().to_string())
        .collect()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_under_plan_scenario() {
    let metrics = ProgressMetrics::new(1000.0, 400.0);
    assert_eq!(metrics.percent_label(), "40.00 %");
    assert_eq!(metrics.rest(), 600.0);
    assert!((metrics.ratio() - 0.4).abs() < 1e-12);

    let (buf, _) = settle(ProgressBarValue::new(1000.0, 400.0));
    assert!(row(&buf, 0).contains("40.00 %"));
    assert!(row(&buf, 1).contains("600.0"));
    assert_eq!(buf[(4, 1)].bg, Color::from(RgbColor::GREEN));
}

#[test]
fn test_at_plan_scenario() {
    let metrics = ProgressMetrics::new(1000.0, 1000.0);
    assert_eq!(metrics.percent_label(), "100.00 %");
    assert_eq!(metrics.rest(), 0.0);
    assert_eq!(metrics.ratio(), SATURATED_RATIO);

    let (buf, _) = settle(ProgressBarValue::new(1000.0, 1000.0));
    assert!(row(&buf, 1).contains("0.0"));
    // anchored at 57, shifted left to fit inside the area
    assert!(row(&buf, 0).contains("100.00 %"));
    // saturated fill ends at the cap: 4 + (60 - 3 - 8)
    assert_eq!(buf[(52, 1)].bg, Color::from(RgbColor::GREEN));
    assert_ne!(buf[(53, 1)].bg, Color::from(RgbColor::GREEN));
}

#[test]
fn test_over_plan_scenario() {
    let metrics = ProgressMetrics::new(1000.0, 1200.0);
    assert_eq!(metrics.percent_label(), "120.00 %");
    assert_eq!(metrics.rest(), -200.0);

    let (buf, _) = settle(ProgressBarValue::new(1000.0, 1200.0));
    assert!(row(&buf, 0).contains("120.00 %"));
    assert!(row(&buf, 1).contains("-200.0"));
    assert_eq!(buf[(4, 1)].bg, Color::from(RgbColor::RED));
    assert_eq!(buf[(54, 1)].fg, Color::from(RgbColor::RED));
}

#[test]
fn test_over_plan_without_flip_keeps_fill_color() {
    let style = StyleConfig::default().with_flip_color_when_over(false);
    let (buf, _) = settle(ProgressBarValue::new(1000.0, 1200.0).style(style));
    assert_eq!(buf[(4, 1)].bg, Color::from(RgbColor::GREEN));
    // the negative remainder still alerts
    assert_eq!(buf[(54, 1)].fg, Color::from(RgbColor::RED));
}

#[test]
fn test_zero_plan_renders() {
    let (buf, _) = settle(ProgressBarValue::new(0.0, 0.0));
    assert!(row(&buf, 0).contains("0.00 %"));

    let (buf, _) = settle(ProgressBarValue::new(0.0, 25.0));
    assert!(row(&buf, 1).contains("-25.0"));
}

#[test]
fn test_negative_progress_renders_empty_fill() {
    let (buf, _) = settle(ProgressBarValue::new(1000.0, -100.0));
    assert!(row(&buf, 0).contains("-10.00 %"));
    assert!(row(&buf, 1).contains("1100.0"));
    assert_ne!(buf[(4, 1)].bg, Color::from(RgbColor::GREEN));
}

#[test]
fn test_small_progress_label_clamped_to_left_edge() {
    // 0.05 * 60 - 5 * 0.05 = 2.75, so "50.0" would start at -1
    let (buf, _) = settle(ProgressBarValue::new(1000.0, 50.0));
    assert!(row(&buf, 0).starts_with("50.0"));
    assert!(row(&buf, 0).contains("5.00 %"));
}

// ============================================================================
// Dividers
// ============================================================================

#[test]
fn test_dividers_under_plan() {
    let style = StyleConfig::default();
    let (buf, _) = settle(ProgressBarValue::new(1000.0, 400.0));

    // after the fill end (22 + 2), spanning the label row and the bar
    for y in [0, 1] {
        assert_eq!(buf[(24, y)].symbol(), "┃");
        assert_eq!(buf[(24, y)].fg, Color::from(RgbColor::GREEN));
    }
    assert_ne!(buf[(24, 2)].symbol(), "┃");

    // near the planned label (60 - 4 / 2 - 5), spanning the bar and below
    for y in [1, 2] {
        assert_eq!(buf[(53, y)].symbol(), "┃");
        assert_eq!(buf[(53, y)].fg, Color::from(style.resolved_track_color()));
    }
    assert_ne!(buf[(53, 0)].symbol(), "┃");
}

#[test]
fn test_fill_divider_follows_alert_color() {
    // fill is capped at 60 - 6 - 8 = 46, divider at 48
    let (buf, _) = settle(ProgressBarValue::new(1000.0, 1200.0));
    for y in [0, 1] {
        assert_eq!(buf[(48, y)].symbol(), "┃");
        assert_eq!(buf[(48, y)].fg, Color::from(RgbColor::RED));
    }
}

#[test]
fn test_thin_dividers() {
    let style = StyleConfig::default().with_divider_width(1.0);
    let (buf, _) = settle(ProgressBarValue::new(1000.0, 400.0).style(style));
    // 22 + 1
    assert_eq!(buf[(23, 1)].symbol(), "│");
}

// ============================================================================
// Measure / position feedback
// ============================================================================

#[test]
fn test_settles_in_two_passes() {
    let (_, passes) = settle(ProgressBarValue::new(1120.0, 400.0));
    assert_eq!(passes, 2);
}

#[test]
fn test_value_change_with_same_widths_needs_no_extra_pass() {
    let area = Rect::new(0, 0, WIDTH, 3);
    let mut state = ProgressBarState::new();
    let mut buf = Buffer::empty(area);

    ProgressBarValue::new(1120.0, 400.0).render(area, &mut buf, &mut state);
    assert!(state.take_redraw());
    ProgressBarValue::new(1120.0, 400.0).render(area, &mut buf, &mut state);
    assert!(!state.take_redraw());

    // 525.0 / 595.0 measure like 400.0 / 720.0
    ProgressBarValue::new(1120.0, 525.0).render(area, &mut buf, &mut state);
    assert!(!state.needs_redraw());

    // 1150.0 / -30.0 change the progress label width
    ProgressBarValue::new(1120.0, 1150.0).render(area, &mut buf, &mut state);
    assert!(state.take_redraw());
}

/// Measures every glyph as two units wide.
#[derive(Debug, Clone, Copy)]
struct DoubleWidth;

impl TextMeasure for DoubleWidth {
    fn measure(&self, text: &str) -> Size {
        let base = CellMeasure.measure(text);
        Size::new(base.width * 2.0, base.height)
    }
}

#[test]
fn test_custom_measure_feeds_layout() {
    let bar = ProgressBarValue::new(1000.0, 400.0).measure_with(DoubleWidth);
    let sizes = bar.measure_labels();
    assert_eq!(sizes.rest.width, 10.0);

    let (buf, _) = settle(bar);
    // the reserved slot doubles, pushing the track end left: 60 - 10
    assert_eq!(buf[(49, 1)].symbol(), "▌");
}

#[test]
fn test_layout_matches_measured_sizes() {
    let style = StyleConfig::default();
    let metrics = ProgressMetrics::new(1000.0, 400.0);
    let sizes = LabelSizes::measure(&CellMeasure, "1000.0", "400.0", "600.0");
    let plan = layout::compute(f64::from(WIDTH), &style, &metrics, &sizes);
    assert_eq!(plan.track.width, 55.0);
    assert!((plan.fill.width - 22.0).abs() < 1e-9);
}
