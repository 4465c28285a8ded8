//! Scripted demo around a single progress bar.
//!
//! - [`script`]: the untimed step logic
//! - [`driver`]: a cancelable tokio task running the script on a timer
//! - [`host`]: the screen holding the values and drawing the bar
//! - [`animation`]: eased tweening for the fill

pub mod animation;
pub mod driver;
pub mod host;
pub mod script;

pub use animation::{ease_in_out, Tween};
pub use driver::DemoDriver;
pub use host::{buffer_to_string, DemoHost, HOST_ROWS};
pub use script::{DemoScript, ScriptStep};
