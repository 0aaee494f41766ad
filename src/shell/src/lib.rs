//! EduOS shell.
//!
//! Receives submitted lines from the console, runs built-in commands against
//! the RAM filesystem and process table, and prints the prompt.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

pub mod commands;
pub mod fs;
pub mod process;

#[cfg(test)]
mod testutil;

pub use commands::Command;
pub use fs::{DirEntry, EntryKind, RamFs};
pub use process::{Process, ProcessState, ProcessTable};

use core::fmt;
use eduos_console::Dispatcher;
use eduos_hal::{Console, PortIo};

/// Command output bound to a console.
pub struct Output<'a> {
    console: &'a mut dyn Console,
}

impl<'a> Output<'a> {
    /// Wrap a console.
    pub fn new(console: &'a mut dyn Console) -> Self {
        Self { console }
    }

    /// Clear the console.
    pub fn clear(&mut self) {
        self.console.clear();
    }
}

impl fmt::Write for Output<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.console.write_str(s);
        Ok(())
    }
}

/// The interactive shell.
pub struct Shell<P> {
    fs: RamFs,
    processes: ProcessTable,
    io: P,
}

impl<P: PortIo> Shell<P> {
    /// Create a shell with the boot filesystem and system processes.
    pub fn new(io: P) -> Self {
        Self {
            fs: RamFs::with_readme(),
            processes: ProcessTable::with_system_processes(),
            io,
        }
    }

    /// The filesystem.
    pub fn fs(&self) -> &RamFs {
        &self.fs
    }

    /// The process table.
    pub fn processes(&self) -> &ProcessTable {
        &self.processes
    }

    /// Print the prompt, `root@EduOS:<cwd>$ `.
    pub fn prompt(&self, console: &mut dyn Console) {
        console.write_str("root@EduOS:");
        console.write_str(self.fs.cwd());
        console.write_str("$ ");
    }

    /// Run one line without printing the prompt.
    pub fn run(&mut self, line: &str, console: &mut dyn Console) {
        let command = Command::parse(line);
        log::debug!("shell: {:?}", command);
        let mut out = Output::new(console);
        // Console output cannot fail.
        let _ = command.execute(&mut self.fs, &mut self.processes, &mut self.io, &mut out);
    }
}

impl<P: PortIo> Dispatcher for Shell<P> {
    fn submit(&mut self, line: &str, console: &mut dyn Console) {
        self.run(line, console);
        self.prompt(console);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{MockIo, Transcript};

    fn shell() -> Shell<MockIo> {
        Shell::new(MockIo::default())
    }

    fn submit(shell: &mut Shell<MockIo>, line: &str) -> String {
        let mut console = Transcript::default();
        shell.submit(line, &mut console);
        console.text
    }

    #[test]
    fn test_prompt_after_every_line() {
        let mut shell = shell();
        assert_eq!(submit(&mut shell, ""), "root@EduOS:/$ ");
        assert_eq!(submit(&mut shell, "whoami"), "root\nroot@EduOS:/$ ");
    }

    #[test]
    fn test_echo_and_unknown() {
        let mut shell = shell();
        assert_eq!(submit(&mut shell, "echo hello world"), "hello world\nroot@EduOS:/$ ");
        assert_eq!(submit(&mut shell, "frob x"), "Unknown command: frob x\nroot@EduOS:/$ ");
    }

    #[test]
    fn test_ls_lists_readme() {
        let mut shell = shell();
        assert_eq!(submit(&mut shell, "ls"), "Listing: /\n      readme.txt\nroot@EduOS:/$ ");
    }

    #[test]
    fn test_mkdir_cd_changes_prompt() {
        let mut shell = shell();
        assert_eq!(submit(&mut shell, "mkdir home"), "Directory created.\nroot@EduOS:/$ ");
        assert_eq!(submit(&mut shell, "cd home"), "root@EduOS:/home/$ ");
        assert_eq!(submit(&mut shell, "ls"), "Listing: /home/\n(Empty)\nroot@EduOS:/home/$ ");
        assert_eq!(submit(&mut shell, "cd.."), "root@EduOS:/$ ");
    }

    #[test]
    fn test_file_commands() {
        let mut shell = shell();
        submit(&mut shell, "touch notes");
        assert_eq!(submit(&mut shell, "write notes buy milk"), "Written.\nroot@EduOS:/$ ");
        assert_eq!(submit(&mut shell, "cat notes"), "buy milk\nroot@EduOS:/$ ");
        assert_eq!(submit(&mut shell, "cp notes copy"), "Copied.\nroot@EduOS:/$ ");
        assert_eq!(submit(&mut shell, "mv copy moved"), "Renamed.\nroot@EduOS:/$ ");
        assert_eq!(submit(&mut shell, "rm notes"), "Deleted.\nroot@EduOS:/$ ");
        assert_eq!(submit(&mut shell, "cat notes"), "Error: Not found.\nroot@EduOS:/$ ");
        assert_eq!(shell.fs().read("moved"), Ok("buy milk"));
    }

    #[test]
    fn test_errors_and_usage() {
        let mut shell = shell();
        assert_eq!(
            submit(&mut shell, "touch readme.txt"),
            "Error: Name already exists.\nroot@EduOS:/$ "
        );
        assert_eq!(
            submit(&mut shell, "cd nowhere"),
            "Error: Directory not found.\nroot@EduOS:/$ "
        );
        assert_eq!(submit(&mut shell, "mv"), "Usage: mv [old] [new]\nroot@EduOS:/$ ");
    }

    #[test]
    fn test_start_and_monitor() {
        let mut shell = shell();
        submit(&mut shell, "start");
        assert_eq!(shell.processes().len(), 3);
        let listing = submit(&mut shell, "monitor");
        assert!(listing.starts_with("\nPID   | STATE | MEMORY | NAME\n"));
        assert!(listing.contains("1000  |   RUN   |  4096B  | KERNEL\n"));
        assert!(listing.contains("1002  |   RDY   |  1024B  | Worker\n"));
    }

    #[test]
    fn test_start_reports_full_table() {
        let mut shell = shell();
        for _ in 0..8 {
            submit(&mut shell, "start");
        }
        assert_eq!(submit(&mut shell, "start"), "Error: Max processes reached.\nroot@EduOS:/$ ");
    }

    #[test]
    fn test_clear_and_reboot() {
        let mut shell = shell();
        let mut console = Transcript::default();
        shell.submit("clear", &mut console);
        assert_eq!(console.clears, 1);

        assert_eq!(submit(&mut shell, "reboot"), "Rebooting...\nroot@EduOS:/$ ");
        assert_eq!(shell.io.writes, vec![(0x64, 0xFE)]);
    }
}
