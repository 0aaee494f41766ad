//! x86_64 architecture support.
//!
//! Provides VGA text memory, port I/O, the 8259 PICs, interrupt handlers and
//! serial output for x86_64 platforms.

pub mod interrupts;
pub mod pic;
pub mod port;
pub mod serial;
pub mod vga;

pub use pic::{InterruptIndex, PicController};
pub use port::X86Ports;
pub use serial::SERIAL;
pub use vga::VgaBuffer;

/// Halts the CPU until the next interrupt.
///
/// Used in idle loops to reduce power consumption.
#[inline]
pub fn hlt() {
    x86_64::instructions::hlt();
}

/// Halts the CPU in an infinite loop.
///
/// Interrupts stay enabled, so the keyboard keeps being serviced.
pub fn halt_loop() -> ! {
    loop {
        hlt();
    }
}
