//! Test doubles for the shell.

use eduos_hal::{Console, PortIo};

/// Console that records everything written to it.
#[derive(Default)]
pub struct Transcript {
    pub text: String,
    pub clears: usize,
}

impl Console for Transcript {
    fn write_str(&mut self, s: &str) {
        self.text.push_str(s);
    }

    fn clear(&mut self) {
        self.text.clear();
        self.clears += 1;
    }
}

/// Port I/O that records writes and reads back zero.
#[derive(Default)]
pub struct MockIo {
    pub writes: Vec<(u16, u8)>,
}

impl PortIo for MockIo {
    fn inb(&mut self, _port: u16) -> u8 {
        0
    }

    fn outb(&mut self, port: u16, value: u8) {
        self.writes.push((port, value));
    }
}
