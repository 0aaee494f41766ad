//! Terminal subsystem for EduOS.
//!
//! Owns the single console session: scancode decoder, line editor, VGA screen
//! and shell. Everything that touches the screen goes through [`session`].

use crate::arch::x86_64::{InterruptIndex, PicController, VgaBuffer, X86Ports};
use eduos_console::{ConsoleSession, DecodedEvent, Screen};
use eduos_shell::Shell;
use spin::Mutex;
use x86_64::instructions::interrupts;

/// The kernel's console session type.
pub type KernelSession = ConsoleSession<VgaBuffer, X86Ports, Shell<X86Ports>>;

static SESSION: spin::Once<Mutex<KernelSession>> = spin::Once::new();

/// Returns the console session, creating it on first use.
pub fn session() -> &'static Mutex<KernelSession> {
    SESSION.call_once(|| {
        // SAFETY: this is the only place a VgaBuffer is created.
        let buffer = unsafe { VgaBuffer::new() };
        let screen = Screen::new(buffer, X86Ports);
        Mutex::new(ConsoleSession::new(screen, Shell::new(X86Ports)))
    })
}

/// Initializes the console session.
pub fn init() {
    session();
}

/// Makes the session usable from a context that never returns (panic or
/// fatal fault).
///
/// Interrupts go off for good, and a lock held by the interrupted code is
/// released. Callers must halt after reporting.
pub fn claim_for_fatal() {
    interrupts::disable();
    if let Some(session) = SESSION.get() {
        if session.is_locked() {
            // SAFETY: the caller never returns, so the holder that was
            // interrupted never touches the session again.
            unsafe { session.force_unlock() };
        }
    }
}

/// Prints the shell prompt.
pub fn prompt() {
    interrupts::without_interrupts(|| {
        let mut session = session().lock();
        let (screen, shell) = session.parts_mut();
        shell.prompt(screen);
    });
}

/// Services IRQ 1: reads one scancode, acknowledges the PIC and feeds the
/// session.
///
/// Runs inside the interrupt gate, so no other handler or `print!` can hold
/// the session lock here.
pub fn handle_keyboard_interrupt() {
    let mut session = session().lock();
    let event = session.service_interrupt(
        &mut X86Ports,
        &mut PicController,
        InterruptIndex::Keyboard.as_u8(),
    );
    if event != DecodedEvent::Ignored {
        log::trace!("keyboard: {:?}", event);
    }
}
