//! Built-in shell commands.
//!
//! Provides file, process and system commands.

use crate::fs::{EntryKind, RamFs};
use crate::process::ProcessTable;
use crate::Output;
use core::fmt::{self, Write};
use eduos_hal::PortIo;

/// Keyboard controller command port.
const KBD_CONTROLLER_PORT: u16 = 0x64;
/// Controller command that pulses the CPU reset line.
const KBD_CONTROLLER_RESET: u8 = 0xFE;

/// Longest command name.
const MAX_COMMAND_NAME: usize = 8;

/// Text written by `write` when no text is given.
pub const DEFAULT_WRITE_TEXT: &str = "Data written by user";

/// Shell command types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// Display help information.
    Help,
    /// Clear the screen.
    Clear,
    /// Print the user name.
    Whoami,
    /// Restart the machine.
    Reboot,
    /// Echo text.
    Echo {
        /// The text to echo.
        text: &'a str,
    },
    /// List the current directory.
    Ls,
    /// Print the current directory.
    Pwd,
    /// Change directory.
    Cd {
        /// Target path.
        path: &'a str,
    },
    /// Create a directory.
    Mkdir {
        /// Directory name.
        name: &'a str,
    },
    /// Create a file.
    Touch {
        /// File name.
        name: &'a str,
    },
    /// Print a file.
    Cat {
        /// File name.
        name: &'a str,
    },
    /// Write text into a file.
    Write {
        /// File name.
        name: &'a str,
        /// Text to store.
        text: &'a str,
    },
    /// Delete an entry.
    Rm {
        /// Entry name.
        name: &'a str,
    },
    /// Copy an entry.
    Cp {
        /// Source name.
        src: &'a str,
        /// Destination name.
        dest: &'a str,
    },
    /// Rename an entry.
    Mv {
        /// Current name.
        src: &'a str,
        /// New name.
        dest: &'a str,
    },
    /// Show the process table.
    Monitor,
    /// Start a worker process.
    Start,
    /// A known command with missing arguments.
    Usage(&'static str),
    /// Blank line.
    Empty,
    /// Unknown command; carries the whole line.
    Unknown(&'a str),
}

impl<'a> Command<'a> {
    /// Parse a command from a submitted line.
    ///
    /// The first word selects the command (case-insensitive); `arg1` is the
    /// second word and `arg2` everything after it.
    pub fn parse(input: &'a str) -> Command<'a> {
        if input.eq_ignore_ascii_case("cd..") {
            return Command::Cd { path: ".." };
        }

        let (cmd, rest) = input.split_once(' ').unwrap_or((input, ""));
        let (arg1, arg2) = rest.split_once(' ').unwrap_or((rest, ""));

        let mut lower = [0; MAX_COMMAND_NAME];
        match to_lowercase(cmd, &mut lower) {
            "" if rest.is_empty() => Command::Empty,
            "help" => Command::Help,
            "clear" => Command::Clear,
            "whoami" => Command::Whoami,
            "reboot" => Command::Reboot,
            "echo" => Command::Echo { text: rest },
            "ls" => Command::Ls,
            "pwd" => Command::Pwd,
            "monitor" => Command::Monitor,
            "start" => Command::Start,
            "cd" => Self::one_arg(arg1, "Usage: cd [path]", |path| Command::Cd { path }),
            "mkdir" => {
                Self::one_arg(arg1, "Usage: mkdir [name]", |name| Command::Mkdir { name })
            }
            "touch" => {
                Self::one_arg(arg1, "Usage: touch [file]", |name| Command::Touch { name })
            }
            "cat" => Self::one_arg(arg1, "Usage: cat [file]", |name| Command::Cat { name }),
            "rm" => Self::one_arg(arg1, "Usage: rm [file]", |name| Command::Rm { name }),
            "write" => Self::one_arg(arg1, "Usage: write [file] [text]", |name| {
                let text = if arg2.is_empty() { DEFAULT_WRITE_TEXT } else { arg2 };
                Command::Write { name, text }
            }),
            "cp" => Self::two_args(arg1, arg2, "Usage: cp [src] [dest]", |src, dest| {
                Command::Cp { src, dest }
            }),
            "mv" => Self::two_args(arg1, arg2, "Usage: mv [old] [new]", |src, dest| {
                Command::Mv { src, dest }
            }),
            _ => Command::Unknown(input),
        }
    }

    fn one_arg(
        arg: &'a str,
        usage: &'static str,
        build: impl FnOnce(&'a str) -> Command<'a>,
    ) -> Command<'a> {
        if arg.is_empty() {
            Command::Usage(usage)
        } else {
            build(arg)
        }
    }

    fn two_args(
        arg1: &'a str,
        arg2: &'a str,
        usage: &'static str,
        build: impl FnOnce(&'a str, &'a str) -> Command<'a>,
    ) -> Command<'a> {
        if arg1.is_empty() || arg2.is_empty() {
            Command::Usage(usage)
        } else {
            build(arg1, arg2)
        }
    }
}

impl Command<'_> {
    /// Execute the command.
    pub fn execute<P: PortIo>(
        self,
        fs: &mut RamFs,
        processes: &mut ProcessTable,
        io: &mut P,
        out: &mut Output<'_>,
    ) -> fmt::Result {
        match self {
            Command::Help => cmd_help(out),
            Command::Clear => {
                out.clear();
                Ok(())
            }
            Command::Whoami => writeln!(out, "root"),
            Command::Reboot => {
                writeln!(out, "Rebooting...")?;
                log::warn!("shell: reboot requested");
                io.outb(KBD_CONTROLLER_PORT, KBD_CONTROLLER_RESET);
                Ok(())
            }
            Command::Echo { text } => writeln!(out, "{}", text),
            Command::Ls => cmd_ls(fs, out),
            Command::Pwd => writeln!(out, "{}", fs.cwd()),
            Command::Cd { path } => report(out, fs.cd(path), None),
            Command::Mkdir { name } => report(out, fs.mkdir(name), Some("Directory created.")),
            Command::Touch { name } => report(out, fs.create(name), Some("File created.")),
            Command::Cat { name } => match fs.read(name) {
                Ok(text) => writeln!(out, "{}", text),
                Err(e) => writeln!(out, "Error: {}", e),
            },
            Command::Write { name, text } => report(out, fs.write(name, text), Some("Written.")),
            Command::Rm { name } => report(out, fs.delete(name), Some("Deleted.")),
            Command::Cp { src, dest } => report(out, fs.copy(src, dest), Some("Copied.")),
            Command::Mv { src, dest } => report(out, fs.rename(src, dest), Some("Renamed.")),
            Command::Monitor => cmd_monitor(processes, out),
            Command::Start => match processes.create("Worker", 1024) {
                Ok(_) => Ok(()),
                Err(e) => writeln!(out, "Error: {}", e),
            },
            Command::Usage(usage) => writeln!(out, "{}", usage),
            Command::Empty => Ok(()),
            Command::Unknown(line) => writeln!(out, "Unknown command: {}", line),
        }
    }
}

/// ASCII-lowercase `word` into `buf`. Words too long to be a command give `"?"`.
fn to_lowercase<'b>(word: &str, buf: &'b mut [u8; MAX_COMMAND_NAME]) -> &'b str {
    if word.len() > MAX_COMMAND_NAME {
        return "?";
    }
    let out = &mut buf[..word.len()];
    out.copy_from_slice(word.as_bytes());
    out.make_ascii_lowercase();
    core::str::from_utf8(out).unwrap_or("?")
}

fn report<E: fmt::Display>(
    out: &mut Output<'_>,
    result: Result<(), E>,
    done: Option<&str>,
) -> fmt::Result {
    match (result, done) {
        (Ok(()), Some(message)) => writeln!(out, "{}", message),
        (Ok(()), None) => Ok(()),
        (Err(e), _) => writeln!(out, "Error: {}", e),
    }
}

fn cmd_help(out: &mut Output<'_>) -> fmt::Result {
    writeln!(out, "--- EduOS Help ---")?;
    writeln!(out, "File Commands:")?;
    writeln!(out, "  ls            - List files in current dir")?;
    writeln!(out, "  pwd           - Print working directory")?;
    writeln!(out, "  cd [path]     - Change directory (or ..)")?;
    writeln!(out, "  mkdir [name]  - Create directory")?;
    writeln!(out, "  touch [name]  - Create file")?;
    writeln!(out, "  cat [name]    - Read file")?;
    writeln!(out, "  write [n] [t] - Write text to file")?;
    writeln!(out, "  rm [name]     - Delete file")?;
    writeln!(out, "  cp [src] [dst]- Copy file")?;
    writeln!(out, "  mv [old] [new]- Rename/Move file")?;
    writeln!(out)?;
    writeln!(out, "System Commands:")?;
    writeln!(out, "  echo [text]   - Print text")?;
    writeln!(out, "  whoami        - Print user")?;
    writeln!(out, "  clear         - Clear screen")?;
    writeln!(out, "  reboot        - Restart system")?;
    writeln!(out, "  monitor       - Task Manager")?;
    writeln!(out, "  start         - Start dummy process")
}

fn cmd_ls(fs: &RamFs, out: &mut Output<'_>) -> fmt::Result {
    writeln!(out, "Listing: {}", fs.cwd())?;
    let mut found = false;
    for entry in fs.list() {
        found = true;
        let prefix = match entry.kind {
            EntryKind::Directory => "[DIR] ",
            EntryKind::File => "      ",
        };
        writeln!(out, "{}{}", prefix, entry.name)?;
    }
    if !found {
        writeln!(out, "(Empty)")?;
    }
    Ok(())
}

fn cmd_monitor(processes: &ProcessTable, out: &mut Output<'_>) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "PID   | STATE | MEMORY | NAME")?;
    writeln!(out, "----------------------------------")?;
    for process in processes.iter() {
        let gap = if process.memory < 1000 { "   | " } else { "  | " };
        writeln!(
            out,
            "{}  |   {}   |  {}B{}{}",
            process.pid,
            process.state.tag(),
            process.memory,
            gap,
            process.name()
        )?;
    }
    writeln!(out)
}
