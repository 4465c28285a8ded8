//! Interactive terminal mode.
//!
//! Takes over the terminal, draws the demo host whenever it needs a
//! redraw and feeds it the steps coming from the [`DemoDriver`].

use std::io::{self, stdout, Stdout};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::debug;

use crate::config::AppConfig;
use crate::demo::{DemoDriver, DemoHost, ScriptStep};
use crate::error::Result;

/// How long to wait for input between frames (~30 FPS).
const FRAME_TIME: Duration = Duration::from_millis(33);

/// Initialize terminal for TUI mode.
///
/// Raw mode is switched off again if any later setup step fails.
pub fn init_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    undo_on_error(enter_screen(), || {
        let _ = execute!(stdout(), LeaveAlternateScreen);
        let _ = disable_raw_mode();
    })
}

fn enter_screen() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

/// Run `undo` when `result` is an error, passing the result through.
fn undo_on_error<T>(result: io::Result<T>, undo: impl FnOnce()) -> io::Result<T> {
    if result.is_err() {
        undo();
    }
    result
}

/// Restore terminal from TUI mode.
pub fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

/// Whether a key event asks to quit.
fn is_quit(event: &Event) -> bool {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
        }
        _ => false,
    }
}

/// Run the interactive demo until the user quits.
///
/// The driver is started on entry and stopped before the terminal is
/// restored, so no timer outlives the screen.
pub async fn run(config: &AppConfig) -> Result<()> {
    let mut host = DemoHost::new(config);
    let (driver, mut steps) = DemoDriver::new(config.demo.clone());
    driver.start().await;

    let mut terminal = init_terminal()?;
    let outcome = event_loop(&mut terminal, &mut host, &mut steps);

    driver.stop().await;
    let restored = restore_terminal(&mut terminal);
    first_error(outcome, restored)
}

/// The event loop's error wins over a failed restore.
fn first_error(outcome: Result<()>, restored: io::Result<()>) -> Result<()> {
    outcome?;
    restored?;
    Ok(())
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    host: &mut DemoHost,
    steps: &mut mpsc::Receiver<ScriptStep>,
) -> Result<()> {
    loop {
        while let Ok(step) = steps.try_recv() {
            host.apply(step);
        }

        if host.needs_redraw() {
            terminal.draw(|frame| host.render(frame))?;
        }

        if event::poll(FRAME_TIME)? {
            let event = event::read()?;
            if is_quit(&event) {
                debug!("quit requested");
                return Ok(());
            }
            if let Event::Resize(width, height) = event {
                debug!(width, height, "terminal resized");
                // draw() resizes the buffers before rendering
                terminal.draw(|frame| host.render(frame))?;
            }
        }
    }
}
