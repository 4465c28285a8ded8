//! Style configuration for the progress bar widget.
//!
//! Holds the colors and sizes that shape a [`ProgressBarValue`](super::ProgressBarValue).
//! Every field has a default and can be overridden per instance or loaded
//! from the `[style]` section of the config file.

use ratatui::style::Color;
use serde::Deserialize;

/// A 24-bit RGB color.
///
/// Deserializes from a three-element array, e.g. `[34, 197, 94]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RgbColor(pub u8, pub u8, pub u8);

impl RgbColor {
    /// Green (34, 197, 94)
    pub const GREEN: Self = Self(34, 197, 94);
    /// Red (239, 68, 68)
    pub const RED: Self = Self(239, 68, 68);
    /// Gray (107, 114, 128)
    pub const GRAY: Self = Self(107, 114, 128);
    /// Black (0, 0, 0)
    pub const BLACK: Self = Self(0, 0, 0);

    /// Composite this color at `opacity` over `background`.
    ///
    /// `opacity` is clamped to `0.0..=1.0`.
    pub fn blend_over(self, background: RgbColor, opacity: f32) -> RgbColor {
        let a = opacity.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| (fg as f32 * a + bg as f32 * (1.0 - a)).round() as u8;
        RgbColor(
            mix(self.0, background.0),
            mix(self.1, background.1),
            mix(self.2, background.2),
        )
    }
}

impl From<RgbColor> for Color {
    fn from(color: RgbColor) -> Self {
        Color::Rgb(color.0, color.1, color.2)
    }
}

/// Visual configuration of the progress bar.
///
/// Sizes are in logical layout units; the terminal renderer maps one unit
/// to one column.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Fill color of the progress rectangle
    pub progress_color: RgbColor,
    /// Color of the background track
    pub track_color: RgbColor,
    /// Opacity of the track color over `background`
    pub track_opacity: f32,
    /// Corner radius of the track
    pub corner_radius: f64,
    /// Width of the vertical divider marks
    pub divider_width: f64,
    /// Space between the fill and the track edge
    pub inner_padding: f64,
    /// Height of the track
    pub bar_height: f64,
    /// Switch the fill to `alert_color` once progress exceeds the plan
    pub flip_color_when_over: bool,
    /// Color for over-plan fill and negative remaining values
    pub alert_color: RgbColor,
    /// Color of the percentage label
    pub muted_color: RgbColor,
    /// Color of value labels; `None` keeps the terminal foreground
    pub label_color: Option<RgbColor>,
    /// Color the track is blended over
    pub background: RgbColor,
    /// Draw a drop shadow under the track
    pub shadow: bool,
    /// Color of the drop shadow
    pub shadow_color: RgbColor,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            progress_color: RgbColor::GREEN,
            track_color: RgbColor::GRAY,
            track_opacity: 0.7,
            corner_radius: 6.0,
            divider_width: 2.0,
            inner_padding: 4.0,
            bar_height: 20.0,
            flip_color_when_over: true,
            alert_color: RgbColor::RED,
            muted_color: RgbColor::GRAY,
            label_color: None,
            background: RgbColor::BLACK,
            shadow: true,
            shadow_color: RgbColor::GRAY,
        }
    }
}

impl StyleConfig {
    /// Create a style with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fill color.
    pub fn with_progress_color(mut self, color: RgbColor) -> Self {
        self.progress_color = color;
        self
    }

    /// Set the track color and its opacity.
    pub fn with_track_color(mut self, color: RgbColor, opacity: f32) -> Self {
        self.track_color = color;
        self.track_opacity = opacity;
        self
    }

    /// Set the track corner radius.
    pub fn with_corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius;
        self
    }

    /// Set the divider width.
    pub fn with_divider_width(mut self, width: f64) -> Self {
        self.divider_width = width;
        self
    }

    /// Set the inner padding.
    pub fn with_inner_padding(mut self, padding: f64) -> Self {
        self.inner_padding = padding;
        self
    }

    /// Set the bar height.
    pub fn with_bar_height(mut self, height: f64) -> Self {
        self.bar_height = height;
        self
    }

    /// Enable/disable the over-plan color change.
    pub fn with_flip_color_when_over(mut self, flip: bool) -> Self {
        self.flip_color_when_over = flip;
        self
    }

    /// Set the alert color.
    pub fn with_alert_color(mut self, color: RgbColor) -> Self {
        self.alert_color = color;
        self
    }

    /// Set the label color.
    pub fn with_label_color(mut self, color: Option<RgbColor>) -> Self {
        self.label_color = color;
        self
    }

    /// Enable/disable the track shadow.
    pub fn with_shadow(mut self, shadow: bool) -> Self {
        self.shadow = shadow;
        self
    }

    /// Track color after blending with the background.
    pub fn resolved_track_color(&self) -> RgbColor {
        self.track_color
            .blend_over(self.background, self.track_opacity)
    }

    /// Label color as a ratatui color.
    pub fn resolved_label_color(&self) -> Color {
        self.label_color.map(Color::from).unwrap_or(Color::Reset)
    }
}
