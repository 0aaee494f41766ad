//! Line editing on top of the renderer.
//!
//! Every buffer splice is mirrored on screen. Only the part of the line from
//! the cursor to the end is repainted; the on-screen cursor is put back where
//! it was afterwards.

use crate::line::LineBuffer;
use crate::scancode::EditCommand;
use crate::screen::{Screen, BUFFER_WIDTH};
use crate::session::Dispatcher;
use eduos_hal::{PortIo, TextBuffer};

/// Line editor state.
#[derive(Debug, Default)]
pub struct LineEditor {
    line: LineBuffer,
}

impl LineEditor {
    /// Create an editor with an empty line.
    pub const fn new() -> Self {
        Self {
            line: LineBuffer::new(),
        }
    }

    /// The line being edited.
    pub fn line(&self) -> &LineBuffer {
        &self.line
    }

    /// Insert a character at the cursor.
    pub fn insert<B: TextBuffer, P: PortIo>(&mut self, ch: u8, screen: &mut Screen<B, P>) {
        if !self.line.insert(ch) {
            log::debug!("editor: line full, dropping {:#04x}", ch);
            return;
        }
        screen.write_bytes(&[ch]);
        if self.line.cursor() < self.line.len() {
            self.redraw_tail(screen);
        }
    }

    /// Apply an edit command. Submission goes through [`LineEditor::submit`].
    pub fn apply<B: TextBuffer, P: PortIo>(
        &mut self,
        command: EditCommand,
        screen: &mut Screen<B, P>,
    ) {
        match command {
            EditCommand::Backspace => {
                if self.line.remove_before_cursor() {
                    screen.backspace_cell();
                    self.redraw_tail(screen);
                }
            }
            EditCommand::Delete => {
                if self.line.remove_at_cursor() {
                    self.redraw_tail(screen);
                }
            }
            EditCommand::CursorLeft => {
                if self.line.move_left() {
                    screen.move_cursor(-1);
                }
            }
            EditCommand::CursorRight => {
                if self.line.move_right() {
                    screen.move_cursor(1);
                }
            }
            EditCommand::Submit => {}
        }
    }

    /// Finish the line: newline, hand the text to `dispatcher`, start over.
    pub fn submit<B, P, D>(&mut self, screen: &mut Screen<B, P>, dispatcher: &mut D)
    where
        B: TextBuffer,
        P: PortIo,
        D: Dispatcher + ?Sized,
    {
        screen.write_text("\n");
        log::debug!("editor: submitting {:?}", self.line.as_str());
        dispatcher.submit(self.line.as_str(), screen);
        self.line.clear();
    }

    /// Repaint from the cursor to the end of the line, plus one blank cell to
    /// erase a glyph left behind by a deletion, then restore the cursor.
    fn redraw_tail<B: TextBuffer, P: PortIo>(&self, screen: &mut Screen<B, P>) {
        let saved = screen.cursor_offset();
        let mut scrolled = screen.write_bytes(self.line.tail());
        scrolled += screen.write_bytes(b" ");
        // Follow the glyph if the repaint pushed it up.
        screen.set_cursor_offset(saved.saturating_sub(scrolled * BUFFER_WIDTH * 2));
    }
}
