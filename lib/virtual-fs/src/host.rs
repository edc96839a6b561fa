//! Host-side convenience API.
//!
//! The embedding application uses these to seed files before the guest runs
//! and to harvest its output afterwards. They share the table with the
//! syscall layer, so both sides see the same entries. Misuse is logged with
//! `warn!` and reported as an `Err` the caller is free to ignore.

use memfs_wasi_types::{Fd, Fdflags, Filetype, Inode, Timestamp};
#[cfg(feature = "enable-serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{path, FdEntry, FdTable, FileBuffer, FsError, Kind, Result, PREOPEN_FD};

const DIR_MODE: u32 = 0o40755;
const FILE_MODE: u32 = 0o100644;
const BLOCK_SIZE: u64 = 4096;

/// What [`FdTable::stat`] reports about an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "enable-serde", derive(Serialize, Deserialize))]
pub struct Metadata {
    pub ino: Inode,
    pub mode: u32,
    pub nlink: u64,
    pub size: u64,
    pub blksize: u64,
    /// Number of 512-byte blocks.
    pub blocks: u64,
    pub accessed: Timestamp,
    pub modified: Timestamp,
    pub created: Timestamp,
    pub is_dir: bool,
    pub is_file: bool,
}

impl Metadata {
    pub fn filetype(&self) -> Filetype {
        if self.is_dir {
            Filetype::Directory
        } else {
            Filetype::RegularFile
        }
    }

    pub fn len(&self) -> u64 {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

impl From<&FdEntry> for Metadata {
    fn from(entry: &FdEntry) -> Self {
        let size = entry.len();
        Self {
            ino: entry.fd as Inode,
            mode: if entry.is_dir() { DIR_MODE } else { FILE_MODE },
            nlink: 1,
            size,
            blksize: BLOCK_SIZE,
            blocks: size.div_ceil(512),
            accessed: entry.accessed,
            modified: entry.modified,
            created: entry.created,
            is_dir: entry.is_dir(),
            is_file: entry.is_file(),
        }
    }
}

impl FdTable {
    /// Writes `bytes` to `path`, replacing whatever file was there.
    ///
    /// An existing file keeps its fd but loses its old content, cursor and
    /// flags; otherwise a new entry is created.
    pub fn write_file(&mut self, path: &str, bytes: impl Into<Vec<u8>>) -> Result<Fd> {
        let path = self.resolve(path);
        if let Some(entry) = self.entry_at_mut(&path) {
            if entry.is_dir() {
                warn!(%path, "write_file: path is a directory");
                return Err(FsError::IsADirectory);
            }
            entry.replace_content(bytes.into());
            entry.fdflags = Fdflags::empty();
            debug!(fd = entry.fd, %path, size = entry.len(), "replaced file");
            return Ok(entry.fd);
        }
        let fd = self.insert(&path, Kind::File(FileBuffer::from_bytes(bytes)))?;
        debug!(fd, %path, "created file");
        Ok(fd)
    }

    /// Appends `bytes` to the existing file at `path`.
    pub fn append_file(&mut self, path: &str, bytes: &[u8]) -> Result<()> {
        let path = self.resolve(path);
        let Some(entry) = self.entry_at_mut(&path) else {
            warn!(%path, "append_file: no such file");
            return Err(FsError::EntityNotFound);
        };
        let Some(file) = entry.file_mut() else {
            warn!(%path, "append_file: path is a directory");
            return Err(FsError::IsADirectory);
        };
        file.append(bytes)?;
        entry.modified = crate::now_ns();
        Ok(())
    }

    /// The bytes of the file at `path`, if there is one.
    pub fn read_file(&self, path: &str) -> Option<&[u8]> {
        self.entry_at(&self.resolve(path))
            .and_then(FdEntry::file)
            .map(FileBuffer::as_slice)
    }

    /// Everything the guest wrote to stdout.
    pub fn read_stdout(&self) -> &[u8] {
        self.get(1)
            .and_then(FdEntry::file)
            .map(FileBuffer::as_slice)
            .unwrap_or_default()
    }

    /// Everything the guest wrote to stderr.
    pub fn read_stderr(&self) -> &[u8] {
        self.get(2)
            .and_then(FdEntry::file)
            .map(FileBuffer::as_slice)
            .unwrap_or_default()
    }

    /// Removes the entry at `path`. Directories must be empty.
    pub fn unlink(&mut self, path: &str) -> Result<()> {
        let path = self.resolve(path);
        let Some(entry) = self.entry_at(&path) else {
            warn!(%path, "unlink: no such file or directory");
            return Err(FsError::EntityNotFound);
        };
        if entry.is_dir() && self.has_descendants(&path) {
            warn!(%path, "unlink: directory not empty");
            return Err(FsError::DirectoryNotEmpty);
        }
        let fd = entry.fd;
        self.remove(fd).map_err(|err| {
            warn!(%path, %err, "unlink: refused");
            err
        })?;
        Ok(())
    }

    /// Creates a directory entry at `path`.
    pub fn mkdir(&mut self, path: &str) -> Result<Fd> {
        let path = self.resolve(path);
        if self.find_by_path(&path).is_some() {
            warn!(%path, "mkdir: path already exists");
            return Err(FsError::AlreadyExists);
        }
        let fd = self.insert(&path, Kind::Dir)?;
        debug!(fd, %path, "created directory");
        Ok(fd)
    }

    pub fn stat(&self, path: &str) -> Result<Metadata> {
        self.entry_at(&self.resolve(path))
            .map(Metadata::from)
            .ok_or(FsError::EntityNotFound)
    }

    pub fn exists(&self, path: &str) -> bool {
        self.find_by_path(&self.resolve(path)).is_some()
    }

    /// Names of the entries directly beneath `path`, sorted.
    pub fn list_directory(&self, path: &str) -> Vec<String> {
        let dir = self.resolve(path);
        let mut names: Vec<String> = self
            .children(&dir)
            .map(|entry| path::file_name(&entry.path).to_string())
            .collect();
        names.sort();
        names
    }

    /// Changes the working directory. The target must be `/` or an existing
    /// directory entry.
    pub fn change_dir(&mut self, path: &str) -> Result<()> {
        let target = self.resolve(path);
        if target != "/" {
            let Some(entry) = self.entry_at(&target) else {
                warn!(path = %target, "chdir: no such directory");
                return Err(FsError::EntityNotFound);
            };
            if !entry.is_dir() {
                warn!(path = %target, "chdir: not a directory");
                return Err(FsError::BaseNotDirectory);
            }
        }
        debug!(fd = PREOPEN_FD, cwd = %target, "changed directory");
        self.set_cwd(target);
        Ok(())
    }
}
