//! EduOS text console.
//!
//! Turns raw PS/2 scancodes into an editable command line and renders text
//! into an 80x25 VGA-style character-cell display.
//!
//! # Architecture
//!
//! - `screen`: Console renderer (cell writes, hardware cursor, scrolling)
//! - `scancode`: Scancode decoder with modifier tracking
//! - `line`: Fixed-capacity line buffer with an insertion cursor
//! - `editor`: Line editor gluing decoder output to the renderer
//! - `session`: The console session owning all of the above
//!
//! Hardware is reached only through the [`eduos_hal`] traits, so the same
//! code drives real VGA memory in the kernel and in-memory doubles in tests.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

pub mod editor;
pub mod line;
pub mod scancode;
pub mod screen;
pub mod session;

#[cfg(test)]
mod testutil;

pub use editor::LineEditor;
pub use line::{LineBuffer, LINE_CAPACITY};
pub use scancode::{DecodeMode, DecodedEvent, EditCommand, ModifierState, ScancodeDecoder};
pub use screen::{Color, ColorCode, Screen, BUFFER_HEIGHT, BUFFER_SIZE, BUFFER_WIDTH};
pub use session::{ConsoleSession, Dispatcher, KEYBOARD_DATA_PORT};
