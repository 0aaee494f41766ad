//! EduOS Kernel
//!
//! A small teaching kernel with a keyboard-driven text console for x86_64.
//!
//! # Architecture
//!
//! The kernel is structured into the following modules:
//! - `arch`: Platform-specific code (VGA memory, ports, PICs, interrupts, serial)
//! - `boot`: Boot status output
//! - `logger`: `log` backend on the serial port
//! - `terminal`: The console session and keyboard interrupt entry point
//!
//! # Safety
//!
//! This is a `#![no_std]` kernel. All unsafe code is documented with safety
//! invariants explaining why the usage is correct.

#![no_std]
#![feature(abi_x86_interrupt)]
#![warn(missing_docs)]

pub mod arch;
pub mod boot;
pub mod logger;
pub mod terminal;
pub mod tests;
pub mod testutil;

/// Initializes core kernel subsystems.
///
/// Called early in the boot process, with interrupts still disabled.
pub fn init() {
    #[cfg(target_arch = "x86_64")]
    {
        arch::x86_64::serial::init();
        logger::init();
        terminal::init();
        arch::x86_64::interrupts::init_idt();
    }
}
