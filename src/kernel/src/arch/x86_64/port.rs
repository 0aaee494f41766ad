//! Byte-wide I/O port access.

use eduos_hal::PortIo;
use x86_64::instructions::port::Port;

/// Direct `in`/`out` instructions.
#[derive(Debug, Default, Clone, Copy)]
pub struct X86Ports;

impl PortIo for X86Ports {
    fn inb(&mut self, port: u16) -> u8 {
        // SAFETY: the kernel runs in ring 0 with full I/O permission. Callers
        // only address the keyboard controller, the CRTC and the PICs.
        unsafe { Port::<u8>::new(port).read() }
    }

    fn outb(&mut self, port: u16, value: u8) {
        // SAFETY: see `inb`.
        unsafe { Port::<u8>::new(port).write(value) }
    }
}
