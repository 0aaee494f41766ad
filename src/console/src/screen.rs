//! VGA-style text mode renderer.
//!
//! Writes glyphs into a character-cell buffer addressed by linear byte offset
//! and keeps the hardware cursor registers in step. The cursor registers are
//! the single source of truth for the current position.

use core::fmt;
use eduos_hal::{Console, PortIo, TextBuffer};

/// Number of rows in VGA text mode.
pub const BUFFER_HEIGHT: usize = 25;

/// Number of columns in VGA text mode.
pub const BUFFER_WIDTH: usize = 80;

/// Size of the display buffer in bytes (glyph + attribute per cell).
pub const BUFFER_SIZE: usize = BUFFER_HEIGHT * BUFFER_WIDTH * 2;

/// Bytes per display row.
const ROW_BYTES: usize = BUFFER_WIDTH * 2;

/// CRTC index register port.
pub const REG_SCREEN_CTRL: u16 = 0x3D4;

/// CRTC data register port.
pub const REG_SCREEN_DATA: u16 = 0x3D5;

/// CRTC register holding the high byte of the cursor cell index.
const CURSOR_LOCATION_HIGH: u8 = 14;

/// CRTC register holding the low byte of the cursor cell index.
const CURSOR_LOCATION_LOW: u8 = 15;

/// VGA color codes.
///
/// Standard 16-color VGA palette for text mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Color {
    /// Black color.
    Black = 0,
    /// Blue color.
    Blue = 1,
    /// Green color.
    Green = 2,
    /// Cyan color.
    Cyan = 3,
    /// Red color.
    Red = 4,
    /// Magenta color.
    Magenta = 5,
    /// Brown color.
    Brown = 6,
    /// Light gray color.
    LightGray = 7,
    /// Dark gray color.
    DarkGray = 8,
    /// Light blue color.
    LightBlue = 9,
    /// Light green color.
    LightGreen = 10,
    /// Light cyan color.
    LightCyan = 11,
    /// Light red color.
    LightRed = 12,
    /// Pink color.
    Pink = 13,
    /// Yellow color.
    Yellow = 14,
    /// White color.
    White = 15,
}

/// Combined foreground and background color, as stored in the attribute byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct ColorCode(u8);

impl ColorCode {
    /// Light gray on black.
    pub const DEFAULT: ColorCode = ColorCode::new(Color::LightGray, Color::Black);

    /// Creates a new color code from foreground and background colors.
    pub const fn new(foreground: Color, background: Color) -> ColorCode {
        ColorCode((background as u8) << 4 | (foreground as u8))
    }

    /// Returns the raw attribute byte.
    pub const fn as_u8(self) -> u8 {
        self.0
    }
}

/// Byte offset of the cell at `(col, row)`.
pub const fn offset_of(col: usize, row: usize) -> usize {
    2 * (row * BUFFER_WIDTH + col)
}

/// Row containing `offset`.
pub const fn offset_row(offset: usize) -> usize {
    offset / ROW_BYTES
}

/// Column containing `offset`.
pub const fn offset_col(offset: usize) -> usize {
    (offset - offset_row(offset) * ROW_BYTES) / 2
}

/// Text mode renderer over a display buffer and the CRTC cursor ports.
pub struct Screen<B, P> {
    buffer: B,
    ports: P,
    /// Current color code for new characters.
    color_code: ColorCode,
}

impl<B: TextBuffer, P: PortIo> Screen<B, P> {
    /// Creates a renderer over `buffer`, using `ports` for the cursor registers.
    pub fn new(buffer: B, ports: P) -> Self {
        debug_assert!(buffer.len() >= BUFFER_SIZE, "display buffer too small");
        Screen {
            buffer,
            ports,
            color_code: ColorCode::DEFAULT,
        }
    }

    /// Returns the underlying display buffer.
    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    /// Returns the port device used for the cursor registers.
    pub fn ports(&self) -> &P {
        &self.ports
    }

    /// Sets the foreground and background colors for subsequent writes.
    pub fn set_color(&mut self, foreground: Color, background: Color) {
        self.color_code = ColorCode::new(foreground, background);
    }

    /// Returns the color code used for new characters.
    pub fn color_code(&self) -> ColorCode {
        self.color_code
    }

    /// Reads the hardware cursor position as a byte offset.
    pub fn cursor_offset(&mut self) -> usize {
        self.ports.outb(REG_SCREEN_CTRL, CURSOR_LOCATION_HIGH);
        let high = self.ports.inb(REG_SCREEN_DATA) as usize;
        self.ports.outb(REG_SCREEN_CTRL, CURSOR_LOCATION_LOW);
        let low = self.ports.inb(REG_SCREEN_DATA) as usize;
        ((high << 8) | low) * 2
    }

    /// Parks the hardware cursor at byte offset `offset`.
    pub fn set_cursor_offset(&mut self, offset: usize) {
        let cell = (offset / 2) as u16;
        self.ports.outb(REG_SCREEN_CTRL, CURSOR_LOCATION_HIGH);
        self.ports.outb(REG_SCREEN_DATA, (cell >> 8) as u8);
        self.ports.outb(REG_SCREEN_CTRL, CURSOR_LOCATION_LOW);
        self.ports.outb(REG_SCREEN_DATA, (cell & 0xff) as u8);
    }

    /// Writes `s` at the cursor.
    ///
    /// Returns the number of rows the display scrolled.
    pub fn write_text(&mut self, s: &str) -> usize {
        self.write_bytes(s.as_bytes())
    }

    /// Writes raw glyph bytes at the cursor.
    ///
    /// Returns the number of rows the display scrolled.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> usize {
        let offset = self.cursor_offset();
        self.write_from(offset, bytes.iter().copied())
    }

    /// Writes `s` starting at `(col, row)` and leaves the cursor after it.
    pub fn write_text_at(&mut self, s: &str, col: usize, row: usize) -> usize {
        self.write_from(offset_of(col, row), s.bytes())
    }

    fn write_from(&mut self, mut offset: usize, bytes: impl Iterator<Item = u8>) -> usize {
        let mut scrolled = 0;
        for byte in bytes {
            offset = self.handle_scrolling(offset, &mut scrolled);
            if byte == b'\n' {
                offset = offset_of(0, offset_row(offset) + 1);
            } else {
                self.put(offset, byte, self.color_code);
                offset += 2;
            }
        }
        // A write ending exactly on the boundary still scrolls before parking.
        offset = self.handle_scrolling(offset, &mut scrolled);
        self.set_cursor_offset(offset);
        scrolled
    }

    /// Moves the cursor by `delta` cells, clamped to the visible grid.
    pub fn move_cursor(&mut self, delta: isize) {
        let max = (BUFFER_SIZE - 2) as isize;
        let offset = (self.cursor_offset() as isize + delta * 2).clamp(0, max);
        self.set_cursor_offset(offset as usize);
    }

    /// Moves the cursor back one cell and blanks it.
    pub fn backspace_cell(&mut self) {
        let offset = self.cursor_offset().saturating_sub(2);
        self.put(offset, b' ', ColorCode::DEFAULT);
        self.set_cursor_offset(offset);
    }

    /// Clears the entire screen and homes the cursor.
    pub fn clear_screen(&mut self) {
        for row in 0..BUFFER_HEIGHT {
            self.clear_row(row);
        }
        self.set_cursor_offset(offset_of(0, 0));
    }

    /// Scrolls up until `offset` lies inside the grid. Returns the adjusted
    /// offset.
    fn handle_scrolling(&mut self, mut offset: usize, scrolled: &mut usize) -> usize {
        while offset >= BUFFER_SIZE {
            for row in 1..BUFFER_HEIGHT {
                let src = offset_of(0, row);
                let dst = offset_of(0, row - 1);
                for i in 0..ROW_BYTES {
                    let byte = self.buffer.read(src + i);
                    self.buffer.write(dst + i, byte);
                }
            }
            self.clear_row(BUFFER_HEIGHT - 1);
            *scrolled += 1;
            log::trace!("screen: scrolled one row");

            offset -= ROW_BYTES;
        }
        offset
    }

    /// Clears a single row by filling it with spaces.
    fn clear_row(&mut self, row: usize) {
        debug_assert!(row < BUFFER_HEIGHT, "row index out of bounds");

        for col in 0..BUFFER_WIDTH {
            self.put(offset_of(col, row), b' ', self.color_code);
        }
    }

    fn put(&mut self, offset: usize, glyph: u8, color: ColorCode) {
        self.buffer.write(offset, glyph);
        self.buffer.write(offset + 1, color.as_u8());
    }
}

impl<B: TextBuffer, P: PortIo> fmt::Write for Screen<B, P> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let offset = self.cursor_offset();
        self.write_from(
            offset,
            s.bytes().map(|byte| match byte {
                // Printable ASCII or newline
                0x20..=0x7e | b'\n' => byte,
                // Non-printable: show placeholder
                _ => 0xfe,
            }),
        );
        Ok(())
    }
}

impl<B: TextBuffer, P: PortIo> Console for Screen<B, P> {
    fn write_str(&mut self, s: &str) {
        let _ = <Self as fmt::Write>::write_str(self, s);
    }

    fn clear(&mut self) {
        self.clear_screen();
    }
}
