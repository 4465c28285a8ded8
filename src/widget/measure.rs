//! Text measurement for self-sizing labels.
//!
//! The widget measures its labels after drawing them and feeds the sizes
//! into the next layout pass. [`LabelSizes`] is that cache.

use ratatui::text::Line;

/// Width and height of a measured element, in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// A zero size.
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Measures the rendered extent of a label.
pub trait TextMeasure {
    /// Size `text` would occupy when drawn.
    fn measure(&self, text: &str) -> Size;
}

/// Terminal measurement: display columns by one row.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellMeasure;

impl TextMeasure for CellMeasure {
    fn measure(&self, text: &str) -> Size {
        if text.is_empty() {
            return Size::ZERO;
        }
        Size::new(Line::raw(text).width() as f64, 1.0)
    }
}

/// Last measured sizes of the self-measured labels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LabelSizes {
    /// Planned value label
    pub planned: Size,
    /// Progress value label
    pub progress: Size,
    /// Remaining value label
    pub rest: Size,
}

impl LabelSizes {
    /// Measure the three labels.
    pub fn measure<M: TextMeasure + ?Sized>(
        measurer: &M,
        planned: &str,
        progress: &str,
        rest: &str,
    ) -> Self {
        Self {
            planned: measurer.measure(planned),
            progress: measurer.measure(progress),
            rest: measurer.measure(rest),
        }
    }
}
