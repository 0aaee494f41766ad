//! EduOS Hardware Abstraction Layer (HAL) traits.
//!
//! This crate defines traits that abstract away platform-specific hardware details.
//! The kernel implements them on top of real x86 ports and memory; the portable
//! crates are tested against in-memory doubles.

#![no_std]

/// Trait for a text-based console output.
pub trait Console {
    /// Writes a string to the console.
    fn write_str(&mut self, s: &str);
    /// Clears the console screen.
    fn clear(&mut self);
}

/// Trait for controlling interrupts.
pub trait InterruptController {
    /// Globally enables interrupts.
    fn enable(&mut self);
    /// Globally disables interrupts.
    fn disable(&mut self);
    /// Signals the end of an interrupt to the controller.
    fn end_of_interrupt(&mut self, irq: u8);
}

/// Trait for x86-style I/O port access.
///
/// Implementations must complete each access synchronously before returning.
pub trait PortIo {
    /// Reads a byte from an I/O port.
    fn inb(&mut self, port: u16) -> u8;
    /// Writes a byte to an I/O port.
    fn outb(&mut self, port: u16, value: u8);
}

/// Trait for a byte-addressed, memory-mapped text display buffer.
///
/// Each character cell occupies two consecutive bytes: glyph then attribute.
pub trait TextBuffer {
    /// Total size of the buffer in bytes.
    fn len(&self) -> usize;

    /// Returns `true` if the buffer has no cells.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads the byte at `offset`.
    fn read(&self, offset: usize) -> u8;

    /// Writes `value` at `offset`.
    fn write(&mut self, offset: usize, value: u8);
}
