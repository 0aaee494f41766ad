#![no_std]
#![no_main]
#![feature(custom_test_frameworks)]
#![test_runner(eduos_kernel::testutil::test_runner)]
#![reexport_test_harness_main = "test_main"]

use core::panic::PanicInfo;
use eduos_hal::TextBuffer;
use eduos_kernel::boot::{self, Status};
use eduos_kernel::testutil::{exit_qemu, QemuExitCode};
use eduos_kernel::{println, terminal};

#[no_mangle]
pub extern "C" fn _start() -> ! {
    eduos_kernel::testutil::init();
    test_main();
    exit_qemu(QemuExitCode::Success);
    eduos_kernel::arch::x86_64::halt_loop()
}

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    eduos_kernel::testutil::test_panic_handler(info)
}

#[test_case]
fn println_does_not_panic() {
    println!("basic_boot output");
}

#[test_case]
fn println_many_lines_scrolls() {
    for i in 0..40 {
        println!("line {}", i);
    }
    let mut session = terminal::session().lock();
    // Output ends with a newline, so the cursor is at the start of the last row.
    assert_eq!(session.screen_mut().cursor_offset(), 24 * 160);
    assert_eq!(session.screen().buffer().read(23 * 160), b'l');
}

#[test_case]
fn typed_command_runs_in_shell() {
    terminal::session().lock().screen_mut().clear_screen();
    // w h o a m i, enter
    for code in [0x11, 0x23, 0x18, 0x1E, 0x32, 0x17, 0x1C] {
        terminal::session().lock().handle_scancode(code);
    }
    let session = terminal::session().lock();
    assert!(session.line().is_empty());
    let vga = session.screen().buffer();
    assert_eq!(vga.read(0), b'w');
    // "root" on the second row.
    assert_eq!(vga.read(160), b'r');
    assert_eq!(vga.read(166), b't');
}

#[test_case]
fn boot_stage_on_last_row_follows_scroll() {
    terminal::session().lock().screen_mut().set_cursor_offset(24 * 160);
    boot::log_start("stage");
    boot::log_end(Status::Ok);
    let session = terminal::session().lock();
    let vga = session.screen().buffer();
    // The stage line scrolled up to row 23 and its bracket was filled in there.
    assert_eq!(vga.read(23 * 160), b'[');
    assert_eq!(vga.read(23 * 160 + 4), b'O');
    assert_eq!(vga.read(23 * 160 + 14), b's');
    assert_eq!(vga.read(24 * 160), b' ');
}

#[test_case]
fn fatal_path_takes_over_held_session() {
    // A holder that never releases, like a shell command that faulted.
    core::mem::forget(terminal::session().lock());
    terminal::claim_for_fatal();
    println!("fatal report");
    assert!(!terminal::session().is_locked());
}
