//! Kernel-level tests.
//!
//! Run at boot against the real hardware, before the keyboard is enabled.

use crate::arch::x86_64::X86Ports;
use crate::serial_println;
use crate::terminal;
use eduos_console::{DecodedEvent, LineBuffer, ScancodeDecoder};
use eduos_shell::Shell;

/// Runs all kernel tests.
pub fn run_all() {
    serial_println!("Running kernel tests...");

    test_scancode_decoder();
    test_line_buffer();
    test_shell_seeded();
    test_hardware_cursor();

    serial_println!("All kernel tests passed!");
}

fn test_scancode_decoder() {
    serial_println!("test_scancode_decoder... ");
    let mut decoder = ScancodeDecoder::new();
    assert_eq!(decoder.decode(0x1E), DecodedEvent::Character(b'a'));
    decoder.decode(0x2A);
    assert_eq!(decoder.decode(0x1E), DecodedEvent::Character(b'A'));
    serial_println!("[ok]");
}

fn test_line_buffer() {
    serial_println!("test_line_buffer... ");
    let mut line = LineBuffer::new();
    assert!(line.insert(b'o'));
    assert!(line.insert(b'k'));
    assert_eq!(line.as_str(), "ok");
    serial_println!("[ok]");
}

fn test_shell_seeded() {
    serial_println!("test_shell_seeded... ");
    let shell = Shell::new(X86Ports);
    assert_eq!(shell.fs().read("readme.txt"), Ok("Welcome! Root directory."));
    assert_eq!(shell.processes().len(), 2);
    serial_println!("[ok]");
}

fn test_hardware_cursor() {
    serial_println!("test_hardware_cursor... ");
    let mut session = terminal::session().lock();
    let screen = session.screen_mut();
    let saved = screen.cursor_offset();
    screen.set_cursor_offset(162);
    assert_eq!(screen.cursor_offset(), 162);
    screen.set_cursor_offset(saved);
    serial_println!("[ok]");
}
