//! planbar - a planned-versus-actual progress bar for the terminal
//!
//! The [`widget`] module holds the ratatui widget and its pure layout; the
//! [`demo`] module drives it with a scripted, animated value.

pub mod config;
pub mod demo;
pub mod error;
pub mod logging;
pub mod tui;
pub mod widget;

pub use error::{Error, Result};
