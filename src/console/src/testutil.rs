//! In-memory hardware doubles for host-side tests.

use crate::screen::{offset_of, Screen, BUFFER_SIZE, BUFFER_WIDTH, REG_SCREEN_CTRL, REG_SCREEN_DATA};
use crate::session::{Dispatcher, KEYBOARD_DATA_PORT};
use eduos_hal::{Console, InterruptController, PortIo, TextBuffer};
use std::collections::VecDeque;
use std::string::String;
use std::vec::Vec;

/// Display memory backed by a plain byte vector, zeroed like VGA memory at power-on.
pub struct MockDisplay {
    bytes: Vec<u8>,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self {
            bytes: vec![0; BUFFER_SIZE],
        }
    }

    pub fn glyph(&self, col: usize, row: usize) -> u8 {
        self.bytes[offset_of(col, row)]
    }

    pub fn attribute(&self, col: usize, row: usize) -> u8 {
        self.bytes[offset_of(col, row) + 1]
    }

    /// Text of one row with trailing blanks removed; non-ASCII glyphs show as `?`.
    pub fn row_text(&self, row: usize) -> String {
        let text: String = (0..BUFFER_WIDTH)
            .map(|col| match self.glyph(col, row) {
                0 => ' ',
                g @ 0x20..=0x7e => g as char,
                _ => '?',
            })
            .collect();
        text.trim_end().to_string()
    }
}

impl TextBuffer for MockDisplay {
    fn len(&self) -> usize {
        self.bytes.len()
    }

    fn read(&self, offset: usize) -> u8 {
        self.bytes[offset]
    }

    fn write(&mut self, offset: usize, value: u8) {
        self.bytes[offset] = value;
    }
}

/// Port device emulating the CRTC index/data pair and the keyboard data port.
pub struct MockPorts {
    crtc_index: u8,
    crtc: [u8; 256],
    writes: Vec<(u16, u8)>,
    scancodes: VecDeque<u8>,
}

impl MockPorts {
    pub fn new() -> Self {
        Self {
            crtc_index: 0,
            crtc: [0; 256],
            writes: Vec::new(),
            scancodes: VecDeque::new(),
        }
    }

    pub fn with_scancodes(codes: &[u8]) -> Self {
        let mut ports = Self::new();
        ports.scancodes.extend(codes.iter().copied());
        ports
    }

    pub fn writes(&self) -> &[(u16, u8)] {
        &self.writes
    }
}

impl PortIo for MockPorts {
    fn inb(&mut self, port: u16) -> u8 {
        match port {
            REG_SCREEN_DATA => self.crtc[self.crtc_index as usize],
            KEYBOARD_DATA_PORT => self.scancodes.pop_front().unwrap_or(0),
            _ => 0xff,
        }
    }

    fn outb(&mut self, port: u16, value: u8) {
        self.writes.push((port, value));
        match port {
            REG_SCREEN_CTRL => self.crtc_index = value,
            REG_SCREEN_DATA => self.crtc[self.crtc_index as usize] = value,
            _ => {}
        }
    }
}

/// Interrupt controller that records acknowledged IRQs.
#[derive(Default)]
pub struct MockPic {
    pub acknowledged: Vec<u8>,
    pub enabled: bool,
}

impl InterruptController for MockPic {
    fn enable(&mut self) {
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.enabled = false;
    }

    fn end_of_interrupt(&mut self, irq: u8) {
        self.acknowledged.push(irq);
    }
}

/// Dispatcher that remembers every submitted line and answers with a prompt.
#[derive(Default)]
pub struct RecordingDispatcher {
    pub lines: Vec<String>,
}

impl Dispatcher for RecordingDispatcher {
    fn submit(&mut self, line: &str, console: &mut dyn Console) {
        self.lines.push(line.to_string());
        console.write_str("> ");
    }
}

pub type MockScreen = Screen<MockDisplay, MockPorts>;

pub fn screen() -> MockScreen {
    Screen::new(MockDisplay::new(), MockPorts::new())
}
