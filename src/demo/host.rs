//! Host screen for the demo: a title above one progress bar.
//!
//! The host owns the planned and progress values, applies script steps to
//! them and tracks whether the screen needs to be drawn again.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, StatefulWidget, Widget},
    Frame,
};
use std::time::Duration;
use tracing::info;

use super::animation::Tween;
use super::script::ScriptStep;
use crate::config::AppConfig;
use crate::widget::{ProgressBarState, ProgressBarValue, StyleConfig, BAR_ROWS};

/// Rows used by the host: title, spacer and the bar.
pub const HOST_ROWS: u16 = 2 + BAR_ROWS;

/// Upper bound of passes when settling a frame.
const MAX_SETTLE_PASSES: usize = 3;

/// The demo screen state.
#[derive(Debug, Clone)]
pub struct DemoHost {
    title: String,
    planned: f64,
    progress: f64,
    /// Animated value the fill geometry follows
    fill: Tween,
    animation: Duration,
    style: StyleConfig,
    bar_state: ProgressBarState,
    dirty: bool,
    finished: bool,
}

impl DemoHost {
    /// Create a host from configuration.
    pub fn new(config: &AppConfig) -> Self {
        let animation = config.demo.animation();
        Self {
            title: "Progress".to_string(),
            planned: config.demo.planned,
            progress: config.demo.progress,
            fill: Tween::settled(config.demo.progress, animation),
            animation,
            style: config.style.clone(),
            bar_state: ProgressBarState::new(),
            dirty: true,
            finished: false,
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Target value.
    pub fn planned(&self) -> f64 {
        self.planned
    }

    /// Current value.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Whether the script reported its last step.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Change the target value.
    pub fn set_planned(&mut self, planned: f64) {
        if planned != self.planned {
            self.planned = planned;
            self.dirty = true;
        }
    }

    /// Change the current value, animating the fill towards it.
    pub fn set_progress(&mut self, progress: f64) {
        if progress != self.progress {
            self.progress = progress;
            self.fill.retarget(progress);
            self.dirty = true;
        }
    }

    /// Apply a step from the demo script.
    pub fn apply(&mut self, step: ScriptStep) {
        self.set_progress(step.value());
        if step.is_finished() {
            self.finished = true;
            info!(
                progress = self.progress,
                planned = self.planned,
                "demo reached plan"
            );
        }
    }

    /// Jump the fill animation to its target.
    pub fn finish_animation(&mut self) {
        if !self.fill.is_complete() {
            self.fill = Tween::settled(self.progress, self.animation);
            self.dirty = true;
        }
    }

    /// Whether something changed since the last draw: new values, a
    /// running animation, or labels that measured differently.
    pub fn needs_redraw(&self) -> bool {
        self.dirty || !self.fill.is_complete() || self.bar_state.needs_redraw()
    }

    /// Render into a ratatui frame.
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.draw(area, frame.buffer_mut());
    }

    /// Render a settled frame as plain text, `width` columns wide.
    ///
    /// Finishes any running animation and repeats the pass until label
    /// sizes are stable.
    pub fn render_to_string(&mut self, width: u16) -> String {
        self.finish_animation();
        let area = Rect::new(0, 0, width, HOST_ROWS);
        let mut buf = Buffer::empty(area);
        for _ in 0..MAX_SETTLE_PASSES {
            buf = Buffer::empty(area);
            self.draw(area, &mut buf);
            if !self.bar_state.needs_redraw() {
                break;
            }
        }
        buffer_to_string(&buf)
    }

    fn draw(&mut self, area: Rect, buf: &mut Buffer) {
        self.dirty = false;
        self.bar_state.take_redraw();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(1)
            .constraints([
                Constraint::Length(1),        // Title
                Constraint::Length(1),        // Spacer
                Constraint::Length(BAR_ROWS), // Bar
                Constraint::Min(0),
            ])
            .split(area);

        let title = Line::from(Span::styled(
            self.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        Paragraph::new(title)
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        let bar = ProgressBarValue::new(self.planned, self.progress)
            .style(self.style.clone())
            .fill_progress(self.fill.value());
        StatefulWidget::render(bar, chunks[2], buf, &mut self.bar_state);
    }
}

/// Text content of a buffer, trailing blanks removed.
pub fn buffer_to_string(buf: &Buffer) -> String {
    let area = buf.area;
    let mut lines: Vec<String> = (area.top()..area.bottom())
        .map(|y| {
            (area.left()..area.right())
                .map(|x| buf[(x, y)].symbol())
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect();
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::DemoScript;

    fn host() -> DemoHost {
        DemoHost::new(&AppConfig::default())
    }

    #[test]
    fn test_new_host_needs_first_draw() {
        let host = host();
        assert_eq!(host.planned(), 1120.0);
        assert_eq!(host.progress(), 400.0);
        assert!(host.needs_redraw());
        assert!(!host.is_finished());
    }

    #[test]
    fn test_render_to_string_settles() {
        let mut host = host();
        let output = host.render_to_string(60);
        assert!(output.contains("Progress"));
        assert!(output.contains("400.0"));
        assert!(output.contains("35.71 %"));
        assert!(output.contains("720.0"));
        assert!(output.contains("1120.0"));
        assert!(!host.needs_redraw());
    }

    #[test]
    fn test_setting_same_value_is_not_a_change() {
        let mut host = host();
        host.render_to_string(60);
        host.set_progress(400.0);
        host.set_planned(1120.0);
        assert!(!host.needs_redraw());
    }

    #[test]
    fn test_apply_steps() {
        let mut host = host();
        let mut script = DemoScript::new(1120.0, 400.0, 125.0);
        for _ in 0..3 {
            host.apply(script.advance().unwrap());
        }
        assert_eq!(host.progress(), 775.0);
        assert!(host.needs_redraw());

        for step in script {
            host.apply(step);
        }
        assert_eq!(host.progress(), 1150.0);
        assert!(host.is_finished());

        let output = host.render_to_string(60);
        assert!(output.contains("-30.0"));
        assert!(output.contains("102.68 %"));
    }

    #[test]
    fn test_finish_animation() {
        let mut host = host();
        host.set_progress(525.0);
        host.finish_animation();
        host.render_to_string(60);
        assert!(!host.needs_redraw());
    }

    #[test]
    fn test_custom_title() {
        let mut host = host().with_title("Budget");
        assert!(host.render_to_string(40).contains("Budget"));
    }

    #[test]
    fn test_buffer_to_string_trims() {
        let buf = Buffer::empty(Rect::new(0, 0, 5, 3));
        assert_eq!(buffer_to_string(&buf), "");
    }
}
