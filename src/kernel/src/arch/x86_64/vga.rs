//! VGA text mode memory for x86_64.
//!
//! Exposes the text buffer at 0xB8000 to the console renderer and provides the
//! kernel's `print!`/`println!` macros, which write through the console
//! session's screen.

use core::fmt::{self, Write};
use core::ptr;
use eduos_console::{Color, BUFFER_SIZE};
use eduos_hal::TextBuffer;
use x86_64::instructions::interrupts;

/// VGA text buffer memory-mapped I/O address.
const VGA_BUFFER_ADDR: usize = 0xB8000;

/// The VGA text buffer.
pub struct VgaBuffer {
    /// SAFETY: This pointer is valid for the lifetime of the kernel.
    /// The VGA buffer at 0xB8000 is always mapped in x86 real/protected mode.
    base: *mut u8,
}

// SAFETY: VgaBuffer only accesses the VGA buffer through volatile operations.
// The buffer is memory-mapped hardware that exists for the kernel's lifetime.
// Access is synchronized through the console session lock.
unsafe impl Send for VgaBuffer {}

impl VgaBuffer {
    /// Binds the standard text buffer.
    ///
    /// # Safety
    ///
    /// At most one `VgaBuffer` may be live at a time.
    pub unsafe fn new() -> Self {
        Self {
            base: VGA_BUFFER_ADDR as *mut u8,
        }
    }
}

impl TextBuffer for VgaBuffer {
    fn len(&self) -> usize {
        BUFFER_SIZE
    }

    fn read(&self, offset: usize) -> u8 {
        if offset >= BUFFER_SIZE {
            return 0;
        }
        // SAFETY: offset is inside the 4000-byte text buffer. Using volatile
        // reads because the VGA buffer is memory-mapped I/O.
        unsafe { ptr::read_volatile(self.base.add(offset)) }
    }

    fn write(&mut self, offset: usize, value: u8) {
        if offset >= BUFFER_SIZE {
            return;
        }
        // SAFETY: as in `read`.
        unsafe { ptr::write_volatile(self.base.add(offset), value) }
    }
}

/// Prints to the VGA buffer without a newline.
#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => {
        $crate::arch::x86_64::vga::_print(format_args!($($arg)*))
    };
}

/// Prints to the VGA buffer with a newline.
#[macro_export]
macro_rules! println {
    () => ($crate::print!("\n"));
    ($($arg:tt)*) => ($crate::print!("{}\n", format_args!($($arg)*)))
}

/// Internal print function used by macros.
///
/// Runs with interrupts disabled so the keyboard handler never finds the
/// session locked.
#[doc(hidden)]
pub fn _print(args: fmt::Arguments) {
    interrupts::without_interrupts(|| {
        let _ = crate::terminal::session().lock().screen_mut().write_fmt(args);
    });
}

/// Sets the VGA output color.
pub fn set_color(foreground: Color, background: Color) {
    interrupts::without_interrupts(|| {
        crate::terminal::session()
            .lock()
            .screen_mut()
            .set_color(foreground, background);
    });
}

/// Restores the default light gray on black.
pub fn reset_color() {
    set_color(Color::LightGray, Color::Black);
}

/// Clears the VGA screen.
pub fn clear_screen() {
    interrupts::without_interrupts(|| {
        crate::terminal::session().lock().screen_mut().clear_screen();
    });
}
