//! Static process table.
//!
//! There is no scheduler; the table is bookkeeping shown by `monitor`.

use core::fmt;
use eduos_common::ProcessError;

/// Maximum number of processes.
pub const MAX_PROCESSES: usize = 10;

/// Maximum process name length in bytes.
pub const MAX_NAME: usize = 19;

/// PID of the first process.
const FIRST_PID: u32 = 1000;

/// Process state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    /// Waiting to run.
    Ready,
    /// Running.
    Running,
    /// Waiting on something.
    Blocked,
}

impl ProcessState {
    /// Three-letter tag used in listings.
    pub fn tag(self) -> &'static str {
        match self {
            ProcessState::Running => "RUN",
            ProcessState::Ready => "RDY",
            ProcessState::Blocked => "BLK",
        }
    }
}

/// One process record.
#[derive(Clone, Copy)]
pub struct Process {
    /// Process ID.
    pub pid: u32,
    name: [u8; MAX_NAME],
    name_len: usize,
    /// Current state.
    pub state: ProcessState,
    /// Reported memory usage in bytes.
    pub memory: u32,
}

impl Process {
    /// Process name.
    pub fn name(&self) -> &str {
        core::str::from_utf8(&self.name[..self.name_len]).unwrap_or_default()
    }
}

impl fmt::Debug for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Process")
            .field("pid", &self.pid)
            .field("name", &self.name())
            .field("state", &self.state)
            .field("memory", &self.memory)
            .finish()
    }
}

/// Fixed-capacity process list.
pub struct ProcessTable {
    processes: [Option<Process>; MAX_PROCESSES],
    count: usize,
}

impl ProcessTable {
    /// An empty table.
    pub const fn new() -> Self {
        Self {
            processes: [None; MAX_PROCESSES],
            count: 0,
        }
    }

    /// The boot table: `KERNEL` and `SHELL`, both running.
    pub fn with_system_processes() -> Self {
        let mut table = Self::new();
        for (name, memory) in [("KERNEL", 4096), ("SHELL", 2048)] {
            if let Ok(pid) = table.create(name, memory) {
                table.set_state(pid, ProcessState::Running);
            }
        }
        table
    }

    /// Add a process in the `Ready` state. Names longer than
    /// [`MAX_NAME`] bytes are truncated.
    pub fn create(&mut self, name: &str, memory: u32) -> Result<u32, ProcessError> {
        if self.count >= MAX_PROCESSES {
            return Err(ProcessError::TableFull);
        }
        let mut len = name.len().min(MAX_NAME);
        while !name.is_char_boundary(len) {
            len -= 1;
        }
        let mut stored = [0; MAX_NAME];
        stored[..len].copy_from_slice(&name.as_bytes()[..len]);

        let pid = FIRST_PID + self.count as u32;
        self.processes[self.count] = Some(Process {
            pid,
            name: stored,
            name_len: len,
            state: ProcessState::Ready,
            memory,
        });
        self.count += 1;
        log::info!("process: created {} (pid {})", &name[..len], pid);
        Ok(pid)
    }

    /// Change the state of `pid`. Returns `false` if there is no such process.
    pub fn set_state(&mut self, pid: u32, state: ProcessState) -> bool {
        match self.processes.iter_mut().flatten().find(|p| p.pid == pid) {
            Some(process) => {
                process.state = state;
                true
            }
            None => false,
        }
    }

    /// Look up a process by PID.
    pub fn get(&self, pid: u32) -> Option<&Process> {
        self.iter().find(|p| p.pid == pid)
    }

    /// All processes in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Process> {
        self.processes.iter().flatten()
    }

    /// Number of processes.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl Default for ProcessTable {
    fn default() -> Self {
        Self::new()
    }
}
