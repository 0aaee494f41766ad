//! System-wide error types for EduOS.

use core::fmt;

/// In-memory filesystem error types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FsError {
    /// An entry with the same full path already exists
    NameExists,
    /// Every slot of the entry table is in use
    DiskFull,
    /// No entry matches the path
    NotFound,
    /// Source of a copy or rename does not exist
    SourceNotFound,
    /// The path names something that is not a directory
    DirectoryNotFound,
    /// Attempted to read a directory as a file
    IsADirectory,
    /// Attempted to write data into a directory
    WriteToDirectory,
    /// Full path does not fit in an entry name
    NameTooLong,
    /// Data does not fit in an entry
    DataTooLarge,
}

impl fmt::Display for FsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FsError::NameExists => write!(f, "Name already exists."),
            FsError::DiskFull => write!(f, "Disk full."),
            FsError::NotFound => write!(f, "Not found."),
            FsError::SourceNotFound => write!(f, "Source not found."),
            FsError::DirectoryNotFound => write!(f, "Directory not found."),
            FsError::IsADirectory => write!(f, "Is a directory."),
            FsError::WriteToDirectory => write!(f, "Cannot write to directory."),
            FsError::NameTooLong => write!(f, "Name too long."),
            FsError::DataTooLarge => write!(f, "Data too large."),
        }
    }
}

/// Process table error types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProcessError {
    /// The table already holds the maximum number of processes
    TableFull,
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::TableFull => write!(f, "Max processes reached."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(FsError::DiskFull.to_string(), "Disk full.");
        assert_eq!(FsError::WriteToDirectory.to_string(), "Cannot write to directory.");
        assert_eq!(ProcessError::TableFull.to_string(), "Max processes reached.");
    }
}
