//! RAM filesystem implementation.
//!
//! A fixed table of named entries. Names are full paths; directories are
//! entries of kind [`EntryKind::Directory`] and exist only as prefixes of their
//! children's names. The current working directory always ends in `/`.

use eduos_common::FsError;

/// Maximum number of entries.
pub const MAX_FILES: usize = 20;
/// Maximum length of a full path in bytes.
pub const MAX_FILENAME: usize = 32;
/// Maximum file size in bytes.
pub const MAX_FILESIZE: usize = 1024;

/// Kind of a filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file.
    File,
    /// Directory.
    Directory,
}

/// Fixed-size path storage.
#[derive(Clone, Copy)]
struct Path {
    bytes: [u8; MAX_FILENAME],
    len: usize,
}

impl Path {
    const ROOT: Path = {
        let mut bytes = [0; MAX_FILENAME];
        bytes[0] = b'/';
        Path { bytes, len: 1 }
    };

    fn as_str(&self) -> &str {
        core::str::from_utf8(&self.bytes[..self.len]).unwrap_or_default()
    }

    fn push(&mut self, s: &str) -> Result<(), FsError> {
        let end = self.len + s.len();
        if end > MAX_FILENAME {
            return Err(FsError::NameTooLong);
        }
        self.bytes[self.len..end].copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }

    fn ends_with_slash(&self) -> bool {
        self.len > 0 && self.bytes[self.len - 1] == b'/'
    }
}

#[derive(Clone, Copy)]
struct Entry {
    name: Path,
    data: [u8; MAX_FILESIZE],
    size: usize,
    kind: EntryKind,
}

impl Entry {
    fn data(&self) -> &str {
        core::str::from_utf8(&self.data[..self.size]).unwrap_or_default()
    }
}

/// One line of a directory listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirEntry<'a> {
    /// Name relative to the current directory.
    pub name: &'a str,
    /// Entry kind.
    pub kind: EntryKind,
}

/// A simple in-memory filesystem.
pub struct RamFs {
    entries: [Option<Entry>; MAX_FILES],
    cwd: Path,
}

impl RamFs {
    /// Create a new empty RAM filesystem rooted at `/`.
    pub fn new() -> Self {
        Self {
            entries: [None; MAX_FILES],
            cwd: Path::ROOT,
        }
    }

    /// Create the boot filesystem holding `readme.txt`.
    pub fn with_readme() -> Self {
        let mut fs = Self::new();
        let seeded = fs
            .create("readme.txt")
            .and_then(|()| fs.write("readme.txt", "Welcome! Root directory."));
        debug_assert!(seeded.is_ok());
        fs
    }

    /// Current working directory, always ending in `/`.
    pub fn cwd(&self) -> &str {
        self.cwd.as_str()
    }

    /// Number of entries in use.
    pub fn len(&self) -> usize {
        self.entries.iter().flatten().count()
    }

    /// Whether the filesystem holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Create an empty file.
    pub fn create(&mut self, name: &str) -> Result<(), FsError> {
        self.create_entry(name, EntryKind::File)
    }

    /// Create a directory.
    pub fn mkdir(&mut self, name: &str) -> Result<(), FsError> {
        self.create_entry(name, EntryKind::Directory)
    }

    fn create_entry(&mut self, name: &str, kind: EntryKind) -> Result<(), FsError> {
        let path = self.full_path(name)?;
        if self.find(&path).is_some() {
            return Err(FsError::NameExists);
        }
        let slot = self.free_slot().ok_or(FsError::DiskFull)?;
        self.entries[slot] = Some(Entry {
            name: path,
            data: [0; MAX_FILESIZE],
            size: 0,
            kind,
        });
        log::debug!("ramfs: created {} ({:?})", path.as_str(), kind);
        Ok(())
    }

    /// Change the current directory. Accepts `/`, `..`, relative and absolute paths.
    pub fn cd(&mut self, path: &str) -> Result<(), FsError> {
        match path {
            "/" => {
                self.cwd = Path::ROOT;
                Ok(())
            }
            ".." => {
                self.cd_parent();
                Ok(())
            }
            _ => {
                let full = self.full_path(path)?;
                let entry = self.lookup(&full).ok_or(FsError::DirectoryNotFound)?;
                if entry.kind != EntryKind::Directory {
                    return Err(FsError::DirectoryNotFound);
                }
                let mut cwd = full;
                if !cwd.ends_with_slash() {
                    cwd.push("/")?;
                }
                self.cwd = cwd;
                Ok(())
            }
        }
    }

    fn cd_parent(&mut self) {
        let mut len = self.cwd.len;
        if len > 1 && self.cwd.bytes[len - 1] == b'/' {
            len -= 1;
        }
        while len > 1 && self.cwd.bytes[len - 1] != b'/' {
            len -= 1;
        }
        self.cwd.len = len.max(1);
    }

    /// Direct children of the current directory.
    pub fn list(&self) -> impl Iterator<Item = DirEntry<'_>> + '_ {
        let cwd = self.cwd.as_str();
        self.entries.iter().flatten().filter_map(move |entry| {
            let relative = entry.name.as_str().strip_prefix(cwd)?;
            if relative.is_empty() {
                return None;
            }
            // Skip grandchildren; a trailing slash still counts as a direct child.
            if relative.trim_end_matches('/').contains('/') {
                return None;
            }
            Some(DirEntry {
                name: relative,
                kind: entry.kind,
            })
        })
    }

    /// Replace the content of a file.
    pub fn write(&mut self, name: &str, data: &str) -> Result<(), FsError> {
        if data.len() > MAX_FILESIZE {
            return Err(FsError::DataTooLarge);
        }
        let path = self.full_path(name)?;
        let index = self.find(&path).ok_or(FsError::NotFound)?;
        let entry = self.entries[index].as_mut().ok_or(FsError::NotFound)?;
        if entry.kind == EntryKind::Directory {
            return Err(FsError::WriteToDirectory);
        }
        entry.data[..data.len()].copy_from_slice(data.as_bytes());
        entry.size = data.len();
        Ok(())
    }

    /// Content of a file.
    pub fn read(&self, name: &str) -> Result<&str, FsError> {
        let path = self.full_path(name)?;
        let entry = self.lookup(&path).ok_or(FsError::NotFound)?;
        if entry.kind == EntryKind::Directory {
            return Err(FsError::IsADirectory);
        }
        Ok(entry.data())
    }

    /// Remove an entry. Removing a directory leaves its children in place.
    pub fn delete(&mut self, name: &str) -> Result<(), FsError> {
        let path = self.full_path(name)?;
        let index = self.find(&path).ok_or(FsError::NotFound)?;
        self.entries[index] = None;
        Ok(())
    }

    /// Duplicate an entry under a new name.
    pub fn copy(&mut self, src: &str, dest: &str) -> Result<(), FsError> {
        let from = self.full_path(src)?;
        let to = self.full_path(dest)?;
        let mut copy = *self.lookup(&from).ok_or(FsError::SourceNotFound)?;
        if self.find(&to).is_some() {
            return Err(FsError::NameExists);
        }
        let slot = self.free_slot().ok_or(FsError::DiskFull)?;
        copy.name = to;
        self.entries[slot] = Some(copy);
        Ok(())
    }

    /// Rename an entry.
    pub fn rename(&mut self, src: &str, dest: &str) -> Result<(), FsError> {
        let from = self.full_path(src)?;
        let to = self.full_path(dest)?;
        let index = self.find(&from).ok_or(FsError::SourceNotFound)?;
        if self.find(&to).is_some() {
            return Err(FsError::NameExists);
        }
        if let Some(entry) = self.entries[index].as_mut() {
            entry.name = to;
        }
        Ok(())
    }

    /// Resolve `name` against the current directory.
    fn full_path(&self, name: &str) -> Result<Path, FsError> {
        if name.starts_with('/') {
            let mut path = Path {
                bytes: [0; MAX_FILENAME],
                len: 0,
            };
            path.push(name)?;
            return Ok(path);
        }
        let mut path = self.cwd;
        if !path.ends_with_slash() {
            path.push("/")?;
        }
        path.push(name)?;
        Ok(path)
    }

    fn find(&self, path: &Path) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| matches!(entry, Some(e) if e.name.as_str() == path.as_str()))
    }

    fn lookup(&self, path: &Path) -> Option<&Entry> {
        self.entries
            .iter()
            .flatten()
            .find(|entry| entry.name.as_str() == path.as_str())
    }

    fn free_slot(&self) -> Option<usize> {
        self.entries.iter().position(Option::is_none)
    }
}

impl Default for RamFs {
    fn default() -> Self {
        Self::new()
    }
}
