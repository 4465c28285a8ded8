//! Planned-versus-actual progress bar widget for ratatui.
//!
//! The bar occupies three rows: the progress value and percentage above,
//! the track with the remaining value beside it, and the planned value
//! below. Labels size themselves: each render measures the label texts
//! and the next render uses those sizes for its offsets.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{StatefulWidget, Widget},
};
use tracing::trace;

use super::layout::{self, Anchor, Bounds, BAR_TOP};
use super::measure::{CellMeasure, LabelSizes, TextMeasure};
use super::metrics::{value_label, ProgressMetrics};
use super::style::StyleConfig;

/// Rows the widget draws into.
pub const BAR_ROWS: u16 = 3;

/// Radius from which a rectangle gets rounded caps in the terminal.
const ROUNDED_CAP_RADIUS: f64 = 1.0;

/// Per-instance render state: the label sizes measured on the last pass.
#[derive(Debug, Clone, Default)]
pub struct ProgressBarState {
    sizes: LabelSizes,
    redraw_requested: bool,
}

impl ProgressBarState {
    /// Create an empty state. The first pass lays out with zero-sized labels.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sizes used by the next layout pass.
    pub fn sizes(&self) -> &LabelSizes {
        &self.sizes
    }

    /// Whether the last pass measured different sizes than it laid out with.
    pub fn needs_redraw(&self) -> bool {
        self.redraw_requested
    }

    /// Clear and return the redraw request.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    /// Store freshly measured sizes.
    ///
    /// Returns true and requests a redraw only when the sizes changed, so
    /// a stable label never triggers another pass.
    pub fn record(&mut self, measured: LabelSizes) -> bool {
        if measured == self.sizes {
            return false;
        }
        trace!(?measured, previous = ?self.sizes, "label sizes changed");
        self.sizes = measured;
        self.redraw_requested = true;
        true
    }
}

/// A progress bar showing a current value against a planned value.
///
/// # Example
///
/// ```
/// use planbar::widget::{ProgressBarState, ProgressBarValue};
/// use ratatui::{buffer::Buffer, layout::Rect, widgets::StatefulWidget};
///
/// let area = Rect::new(0, 0, 60, 3);
/// let mut buf = Buffer::empty(area);
/// let mut state = ProgressBarState::new();
///
/// ProgressBarValue::new(1000.0, 400.0).render(area, &mut buf, &mut state);
/// if state.take_redraw() {
///     ProgressBarValue::new(1000.0, 400.0).render(area, &mut buf, &mut state);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ProgressBarValue<M = CellMeasure> {
    planned: f64,
    progress: f64,
    /// Value the fill geometry follows, while a transition is running
    fill_progress: Option<f64>,
    style: StyleConfig,
    measure: M,
}

impl ProgressBarValue<CellMeasure> {
    /// Create a bar for `progress` against `planned` with the default style.
    pub fn new(planned: f64, progress: f64) -> Self {
        Self {
            planned,
            progress,
            fill_progress: None,
            style: StyleConfig::default(),
            measure: CellMeasure,
        }
    }
}

impl<M: TextMeasure> ProgressBarValue<M> {
    /// Set the style.
    pub fn style(mut self, style: StyleConfig) -> Self {
        self.style = style;
        self
    }

    /// Size the fill for `value` instead of the progress value.
    ///
    /// Labels and colors keep showing the real progress; this only moves
    /// the geometry, e.g. while animating towards a new value.
    pub fn fill_progress(mut self, value: f64) -> Self {
        self.fill_progress = Some(value);
        self
    }

    /// Use a different text measurement.
    pub fn measure_with<N: TextMeasure>(self, measure: N) -> ProgressBarValue<N> {
        ProgressBarValue {
            planned: self.planned,
            progress: self.progress,
            fill_progress: self.fill_progress,
            style: self.style,
            measure,
        }
    }

    /// Metrics of the displayed values.
    pub fn metrics(&self) -> ProgressMetrics {
        ProgressMetrics::new(self.planned, self.progress)
    }

    /// Measure the self-sizing labels.
    pub fn measure_labels(&self) -> LabelSizes {
        let metrics = self.metrics();
        LabelSizes::measure(
            &self.measure,
            &value_label(self.planned),
            &value_label(self.progress),
            &value_label(metrics.rest()),
        )
    }

    /// Row inside the widget for a logical `y`.
    fn row_of(&self, y: f64) -> u16 {
        if y < BAR_TOP {
            0
        } else if y < BAR_TOP + self.style.bar_height {
            1
        } else {
            2
        }
    }

    /// First and last row touched by `bounds`.
    fn row_span(&self, bounds: Bounds) -> (u16, u16) {
        let last = (bounds.bottom() - 1e-9).max(bounds.y);
        (self.row_of(bounds.y), self.row_of(last))
    }
}

impl<M: TextMeasure> StatefulWidget for ProgressBarValue<M> {
    type State = ProgressBarState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if area.width < 1 || area.height < BAR_ROWS {
            return;
        }

        let metrics = self.metrics();
        let geometry = ProgressMetrics::new(
            self.planned,
            self.fill_progress.unwrap_or(self.progress),
        );
        let layout = layout::compute(
            f64::from(area.width),
            &self.style,
            &geometry,
            state.sizes(),
        );

        let track_color = Color::from(self.style.resolved_track_color());
        let fill_color = Color::from(metrics.fill_color(&self.style));
        let label_color = self.style.resolved_label_color();
        let rest_color = metrics
            .rest_alert(&self.style)
            .map(Color::from)
            .unwrap_or(label_color);

        let mut canvas = Canvas { area, buf };
        let bar_row = self.row_of(layout.track.y);

        if self.style.shadow {
            let (_, shadow_row) = self.row_span(layout.track_shadow);
            if shadow_row > bar_row {
                canvas.shadow(
                    shadow_row,
                    layout.track_shadow,
                    Color::from(self.style.shadow_color),
                );
            }
        }
        canvas.fill_row(
            bar_row,
            layout.track,
            track_color,
            layout.track_radius,
            layout.track_radius,
        );
        canvas.fill_row(
            bar_row,
            layout.fill,
            fill_color,
            layout.fill_leading_radius,
            0.0,
        );
        canvas.label(
            self.row_of(layout.rest_label.y),
            layout.rest_label,
            &value_label(metrics.rest()),
            rest_color,
        );

        canvas.label(
            self.row_of(layout.progress_label.y),
            layout.progress_label,
            &value_label(self.progress),
            label_color,
        );
        canvas.label(
            self.row_of(layout.percent_label.y),
            layout.percent_label,
            &metrics.percent_label(),
            Color::from(self.style.muted_color),
        );
        canvas.divider(
            self.row_span(layout.progress_divider),
            layout.progress_divider,
            fill_color,
        );

        canvas.label(
            self.row_of(layout.planned_label.y),
            layout.planned_label,
            &value_label(self.planned),
            label_color,
        );
        canvas.divider(
            self.row_span(layout.planned_divider),
            layout.planned_divider,
            track_color,
        );

        state.record(self.measure_labels());
    }
}

impl<M: TextMeasure> Widget for ProgressBarValue<M> {
    /// Stateless render: measures first, so the single pass is settled.
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut state = ProgressBarState::new();
        state.record(self.measure_labels());
        StatefulWidget::render(self, area, buf, &mut state);
    }
}

/// Maps logical geometry onto the widget's cells.
struct Canvas<'b> {
    area: Rect,
    buf: &'b mut Buffer,
}

impl Canvas<'_> {
    /// Column span of `[x, x + width)`, clipped to the area.
    fn columns(&self, x: f64, width: f64) -> Option<(u16, u16)> {
        if !width.is_finite() || width <= 0.0 {
            return None;
        }
        let start = x.round().max(0.0);
        let end = (x + width).round().min(f64::from(self.area.width));
        if end <= start {
            return None;
        }
        Some((start as u16, end as u16))
    }

    /// Fill a horizontal rectangle on `row`, with half-block caps for
    /// rounded ends.
    fn fill_row(
        &mut self,
        row: u16,
        bounds: Bounds,
        color: Color,
        leading: f64,
        trailing: f64,
    ) {
        let Some((start, end)) = self.columns(bounds.x, bounds.width) else {
            return;
        };
        let y = self.area.y + row;
        for col in start..end {
            self.buf[(self.area.x + col, y)]
                .set_symbol(" ")
                .set_bg(color);
        }

        if end - start < 2 {
            return;
        }
        if leading >= ROUNDED_CAP_RADIUS && bounds.x.round() >= 0.0 {
            self.buf[(self.area.x + start, y)]
                .set_symbol("▐")
                .set_fg(color)
                .set_bg(Color::Reset);
        }
        if trailing >= ROUNDED_CAP_RADIUS
            && bounds.right().round() <= f64::from(self.area.width)
        {
            self.buf[(self.area.x + end - 1, y)]
                .set_symbol("▌")
                .set_fg(color)
                .set_bg(Color::Reset);
        }
    }

    /// Draw the part of a shadow that shows below the bar row, as upper
    /// half blocks.
    fn shadow(&mut self, row: u16, bounds: Bounds, color: Color) {
        let Some((start, end)) = self.columns(bounds.x, bounds.width) else {
            return;
        };
        let y = self.area.y + row;
        for col in start..end {
            self.buf[(self.area.x + col, y)]
                .set_symbol("▀")
                .set_fg(color);
        }
    }

    /// Draw a vertical mark from `first` to `last` row, keeping backgrounds.
    fn divider(&mut self, (first, last): (u16, u16), bounds: Bounds, color: Color) {
        if !bounds.width.is_finite() || bounds.width <= 0.0 {
            return;
        }
        let col = bounds.x.round();
        if col < 0.0 || col >= f64::from(self.area.width) {
            return;
        }
        let symbol = if bounds.width >= 2.0 { "┃" } else { "│" };
        for row in first..=last.min(BAR_ROWS - 1) {
            self.buf[(self.area.x + col as u16, self.area.y + row)]
                .set_symbol(symbol)
                .set_fg(color);
        }
    }

    /// Draw a label at `anchor`, shifted inside the area when it would
    /// cross either edge. Labels starting past the right edge are hidden.
    fn label(&mut self, row: u16, anchor: Anchor, text: &str, color: Color) {
        let width = f64::from(self.area.width);
        let col = anchor.x.round();
        if col >= width {
            return;
        }
        let text_width = Line::raw(text).width() as f64;
        let col = col.min(width - text_width).max(0.0) as u16;
        self.buf.set_stringn(
            self.area.x + col,
            self.area.y + row,
            text,
            usize::from(self.area.width - col),
            Style::default().fg(color),
        );
    }
}
