//! Boot logging with colored status indicators.
//!
//! Provides Linux-style boot messages with colored status brackets.

pub mod banner;

use crate::arch::x86_64::vga;
use crate::{print, println};
use eduos_console::{Color, BUFFER_WIDTH};
use spin::Mutex;
use x86_64::instructions::interrupts;

/// Screen offset of the status bracket of the stage opened by [`log_start`].
static PENDING: Mutex<Option<usize>> = Mutex::new(None);

/// Boot status indicators.
#[derive(Debug, Clone, Copy)]
pub enum Status {
    /// Success - `[ OK ]` in green
    Ok,
    /// Failure - `[FAIL]` in red
    Fail,
    /// Warning - `[WARN]` in yellow
    Warn,
    /// Informational - `[INFO]` in cyan
    Info,
}

/// Log a boot stage with status.
///
/// Format: `[ OK ] Message text`
pub fn log(status: Status, message: &str) {
    print_status(status);
    println!(" {}", message);
    log::info!("boot: {}", message);
}

/// Open a stage whose status is not known yet.
///
/// Prints `[    ] Message text`; [`log_end`] fills in the bracket.
pub fn log_start(message: &str) {
    let start = interrupts::without_interrupts(|| {
        let mut session = crate::terminal::session().lock();
        let screen = session.screen_mut();
        let start = screen.cursor_offset();
        let scrolled =
            screen.write_text("[    ] ") + screen.write_text(message) + screen.write_text("\n");
        // Follow the line if printing it scrolled the screen.
        start.saturating_sub(scrolled * BUFFER_WIDTH * 2)
    });
    *PENDING.lock() = Some(start);
    log::info!("boot: {}", message);
}

/// Close the stage opened by [`log_start`].
pub fn log_end(status: Status) {
    let Some(start) = PENDING.lock().take() else {
        return;
    };
    let resume = interrupts::without_interrupts(|| {
        let mut session = crate::terminal::session().lock();
        let screen = session.screen_mut();
        let resume = screen.cursor_offset();
        screen.set_cursor_offset(start);
        resume
    });
    print_status(status);
    interrupts::without_interrupts(|| {
        crate::terminal::session().lock().screen_mut().set_cursor_offset(resume);
    });
}

fn print_status(status: Status) {
    let (text, color) = match status {
        Status::Ok => ("[ OK ]", Color::LightGreen),
        Status::Fail => ("[FAIL]", Color::LightRed),
        Status::Warn => ("[WARN]", Color::Yellow),
        Status::Info => ("[INFO]", Color::LightCyan),
    };
    vga::set_color(color, Color::Black);
    print!("{}", text);
    vga::reset_color();
}
