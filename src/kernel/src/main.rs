//! EduOS Kernel Entry Point
//!
//! This is the main entry point for the EduOS kernel.

#![no_std]
#![no_main]

use bootloader::{entry_point, BootInfo};
use core::panic::PanicInfo;
use eduos_console::Color;
use eduos_hal::InterruptController;
use eduos_kernel::arch::x86_64::{self, vga, PicController};
use eduos_kernel::boot::{self, Status};
use eduos_kernel::{println, serial_println, terminal};

entry_point!(kernel_main);

/// Kernel entry point.
///
/// Called by the bootloader after setting up the initial environment.
fn kernel_main(_boot_info: &'static BootInfo) -> ! {
    // ========================================================================
    // Phase 1: Core Initialization (interrupts off)
    // ========================================================================
    eduos_kernel::init();

    vga::clear_screen();
    boot::banner::print_banner();

    // ========================================================================
    // Phase 2: Boot Logging
    // ========================================================================
    boot::log(Status::Ok, "Serial port initialized");
    boot::log(Status::Ok, "IDT configured");
    boot::log(Status::Ok, "PICs remapped");

    boot::log_start("Running kernel tests");
    eduos_kernel::tests::run_all();
    boot::log_end(Status::Ok);

    // Test exception handling
    ::x86_64::instructions::interrupts::int3();
    boot::log(Status::Ok, "Exception handling verified");

    let (entries, processes) = {
        let session = terminal::session().lock();
        let shell = session.dispatcher();
        (shell.fs().len(), shell.processes().len())
    };
    boot::log(Status::Ok, "RAM filesystem mounted at /");
    println!("       {} entries, {} processes", entries, processes);
    println!();

    // ========================================================================
    // Phase 3: Interactive console
    // ========================================================================
    terminal::prompt();
    PicController.enable();
    serial_println!("[BOOT] keyboard enabled");

    // Everything else happens in the keyboard interrupt handler.
    x86_64::halt_loop()
}

/// Panic handler.
///
/// Called when the kernel encounters an unrecoverable error.
#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    // Use the already-initialized serial port
    serial_println!("KERNEL PANIC: {}", info);

    // The panic may have come from inside the keyboard handler.
    terminal::claim_for_fatal();

    vga::set_color(Color::LightRed, Color::Black);
    println!("\n\n!!! KERNEL PANIC !!!");
    vga::reset_color();
    println!("{}", info);

    x86_64::halt_loop()
}
