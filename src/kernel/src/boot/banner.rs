//! Boot banner and branding.

use crate::arch::x86_64::vga;
use crate::println;
use eduos_console::Color;

/// Print the EduOS boot banner.
pub fn print_banner() {
    vga::set_color(Color::Cyan, Color::Black);
    println!("EduOS Kernel v1.2");
    vga::reset_color();
    println!("Type 'help' for commands.");
    println!();
}
