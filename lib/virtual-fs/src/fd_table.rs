use std::collections::{BTreeMap, BTreeSet, HashMap};

use memfs_wasi_types::{Fd, Fdflags, Timestamp};
use tracing::{debug, trace};

use crate::{now_ns, path, FileBuffer, FsError, Result};

/// The preopened root directory handed to the guest.
pub const PREOPEN_FD: Fd = 3;
/// The first fd the table hands out to newly created entries.
pub const FIRST_GUEST_FD: Fd = 4;

pub const STDIN_PATH: &str = "/dev/stdin";
pub const STDOUT_PATH: &str = "/dev/stdout";
pub const STDERR_PATH: &str = "/dev/stderr";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    File(FileBuffer),
    Dir,
}

/// One open file or directory.
#[derive(Debug, Clone)]
pub struct FdEntry {
    pub fd: Fd,
    /// Canonical absolute path.
    pub path: String,
    pub kind: Kind,
    /// Logical read/write cursor; unused for directories.
    pub seek_position: u64,
    pub fdflags: Fdflags,
    pub accessed: Timestamp,
    pub modified: Timestamp,
    pub created: Timestamp,
}

impl FdEntry {
    fn new(fd: Fd, path: String, kind: Kind) -> Self {
        let now = now_ns();
        Self {
            fd,
            path,
            kind,
            seek_position: 0,
            fdflags: Fdflags::empty(),
            accessed: now,
            modified: now,
            created: now,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self.kind, Kind::Dir)
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, Kind::File(_))
    }

    /// stdin, stdout or stderr.
    pub fn is_stdio(&self) -> bool {
        self.fd < PREOPEN_FD
    }

    /// Length in bytes; 0 for directories.
    pub fn len(&self) -> u64 {
        match &self.kind {
            Kind::File(file) => file.len(),
            Kind::Dir => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn file(&self) -> Option<&FileBuffer> {
        match &self.kind {
            Kind::File(file) => Some(file),
            Kind::Dir => None,
        }
    }

    pub fn file_mut(&mut self) -> Option<&mut FileBuffer> {
        match &mut self.kind {
            Kind::File(file) => Some(file),
            Kind::Dir => None,
        }
    }

    /// Replaces the content with `bytes` and rewinds the cursor.
    pub(crate) fn replace_content(&mut self, bytes: Vec<u8>) {
        let now = now_ns();
        self.kind = Kind::File(FileBuffer::from_bytes(bytes));
        self.seek_position = 0;
        self.modified = now;
        self.accessed = now;
    }
}

/// The table of open entries for one guest session.
///
/// Entries are keyed by fd, and a parallel path index guarantees that no two
/// entries share a canonical path. fd 0, 1 and 2 are the standard streams and
/// fd 3 is the preopened root; those four always exist.
#[derive(Debug)]
pub struct FdTable {
    entries: BTreeMap<Fd, FdEntry>,
    by_path: HashMap<String, Fd>,
    /// Released fds below `next_fd`.
    free: BTreeSet<Fd>,
    next_fd: Fd,
    cwd: String,
}

impl Default for FdTable {
    fn default() -> Self {
        Self::new()
    }
}

impl FdTable {
    pub fn new() -> Self {
        let mut table = Self {
            entries: BTreeMap::new(),
            by_path: HashMap::new(),
            free: BTreeSet::new(),
            next_fd: FIRST_GUEST_FD,
            cwd: "/".to_string(),
        };
        table.seed_reserved(Vec::new());
        table
    }

    fn seed_reserved(&mut self, stdin: Vec<u8>) {
        let stdio = [
            (0, STDIN_PATH, stdin),
            (1, STDOUT_PATH, Vec::new()),
            (2, STDERR_PATH, Vec::new()),
        ];
        for (fd, path, content) in stdio {
            let kind = Kind::File(FileBuffer::from_bytes(content));
            let entry = FdEntry::new(fd, path.to_string(), kind);
            self.by_path.insert(entry.path.clone(), fd);
            self.entries.insert(fd, entry);
        }
        // The root stays indexed at "/" while its recorded path follows the cwd.
        let root = FdEntry::new(PREOPEN_FD, self.cwd.clone(), Kind::Dir);
        self.by_path.insert("/".to_string(), PREOPEN_FD);
        self.entries.insert(PREOPEN_FD, root);
    }

    /// Whether `fd` is one of the four entries that always exist.
    pub fn is_reserved(fd: Fd) -> bool {
        fd <= PREOPEN_FD
    }

    pub fn current_dir(&self) -> &str {
        &self.cwd
    }

    pub(crate) fn set_cwd(&mut self, cwd: String) {
        if let Some(root) = self.entries.get_mut(&PREOPEN_FD) {
            root.path = cwd.clone();
        }
        self.cwd = cwd;
    }

    /// Resolves `path` against the current working directory.
    pub fn resolve(&self, path: &str) -> String {
        path::resolve(&self.cwd, path)
    }

    pub fn get(&self, fd: Fd) -> Option<&FdEntry> {
        self.entries.get(&fd)
    }

    pub fn get_mut(&mut self, fd: Fd) -> Option<&mut FdEntry> {
        self.entries.get_mut(&fd)
    }

    /// Looks `fd` up, failing with [`FsError::InvalidFd`].
    pub fn get_fd(&self, fd: Fd) -> Result<&FdEntry> {
        self.entries.get(&fd).ok_or(FsError::InvalidFd)
    }

    pub fn get_fd_mut(&mut self, fd: Fd) -> Result<&mut FdEntry> {
        self.entries.get_mut(&fd).ok_or(FsError::InvalidFd)
    }

    /// The fd bound to `path`, after canonicalizing it.
    pub fn find_by_path(&self, path: &str) -> Option<Fd> {
        self.by_path.get(&path::normalize(path)).copied()
    }

    pub fn entry_at(&self, path: &str) -> Option<&FdEntry> {
        self.find_by_path(path).and_then(|fd| self.entries.get(&fd))
    }

    pub fn entry_at_mut(&mut self, path: &str) -> Option<&mut FdEntry> {
        let fd = self.find_by_path(path)?;
        self.entries.get_mut(&fd)
    }

    /// Whether `path` names the root or a directory entry.
    pub fn is_dir(&self, path: &str) -> bool {
        self.entry_at(path).map(FdEntry::is_dir).unwrap_or(false)
    }

    /// Returns the lowest fd not currently in use.
    pub fn allocate(&mut self) -> Fd {
        match self.free.pop_first() {
            Some(fd) => fd,
            None => {
                let fd = self.next_fd;
                self.next_fd += 1;
                fd
            }
        }
    }

    fn release(&mut self, fd: Fd) {
        if fd + 1 == self.next_fd {
            self.next_fd = fd;
            // Collapse released fds that now sit at the top of the range.
            while self.next_fd > FIRST_GUEST_FD && self.free.remove(&(self.next_fd - 1)) {
                self.next_fd -= 1;
            }
        } else {
            self.free.insert(fd);
        }
    }

    /// Claims `fd` specifically, whether or not it was ever allocated.
    fn claim(&mut self, fd: Fd) {
        if fd >= self.next_fd {
            self.free.extend(self.next_fd..fd);
            self.next_fd = fd + 1;
        } else {
            self.free.remove(&fd);
        }
    }

    /// Creates an entry at `path` and returns its fd.
    ///
    /// Fails with [`FsError::AlreadyExists`] if an entry already claims the
    /// canonical path.
    pub fn insert(&mut self, path: &str, kind: Kind) -> Result<Fd> {
        let path = path::normalize(path);
        if self.by_path.contains_key(&path) {
            return Err(FsError::AlreadyExists);
        }
        let fd = self.allocate();
        trace!(fd, %path, dir = matches!(kind, Kind::Dir), "creating entry");
        self.by_path.insert(path.clone(), fd);
        self.entries.insert(fd, FdEntry::new(fd, path, kind));
        Ok(fd)
    }

    /// Drops the entry at `fd` and frees the fd for reuse.
    ///
    /// The working directory and its ancestors cannot be removed while the
    /// cwd points into them; that fails with [`FsError::ResourceBusy`].
    pub fn remove(&mut self, fd: Fd) -> Result<FdEntry> {
        if Self::is_reserved(fd) {
            return Err(FsError::PermissionDenied);
        }
        if let Some(entry) = self.entries.get(&fd) {
            if entry.is_dir() && self.holds_cwd(&entry.path) {
                return Err(FsError::ResourceBusy);
            }
        }
        self.detach(fd)
    }

    /// Whether the directory `dir` is the cwd or one of its ancestors.
    fn holds_cwd(&self, dir: &str) -> bool {
        dir == self.cwd || path::is_descendant(dir, &self.cwd)
    }

    fn detach(&mut self, fd: Fd) -> Result<FdEntry> {
        let entry = self.entries.remove(&fd).ok_or(FsError::InvalidFd)?;
        self.by_path.remove(&entry.path);
        self.release(fd);
        trace!(fd, path = %entry.path, "removed entry");
        Ok(entry)
    }

    /// Moves the entry at `from` (and, for a directory, everything beneath
    /// it) to `to`. A file already at `to` is replaced; a directory at `to`
    /// is replaced only when empty.
    pub fn rename(&mut self, from: &str, to: &str) -> Result<()> {
        let from = path::normalize(from);
        let to = path::normalize(to);
        let fd = *self.by_path.get(&from).ok_or(FsError::EntityNotFound)?;
        if Self::is_reserved(fd) {
            return Err(FsError::PermissionDenied);
        }
        if from == to {
            return Ok(());
        }
        let moving_dir = self.entries.get(&fd).map(FdEntry::is_dir).unwrap_or(false);
        if moving_dir && path::is_descendant(&from, &to) {
            return Err(FsError::InvalidInput);
        }
        if let Some(&existing) = self.by_path.get(&to) {
            if Self::is_reserved(existing) {
                return Err(FsError::PermissionDenied);
            }
            let target_is_dir = self.entries.get(&existing).map(FdEntry::is_dir).unwrap_or(false);
            match (moving_dir, target_is_dir) {
                (false, true) => return Err(FsError::IsADirectory),
                (true, false) => return Err(FsError::BaseNotDirectory),
                (true, true) if self.has_descendants(&to) => {
                    return Err(FsError::DirectoryNotEmpty)
                }
                _ => {}
            }
            self.remove(existing)?;
        }

        let mut moved = vec![(fd, to.clone())];
        if moving_dir {
            moved.extend(
                self.entries
                    .values()
                    .filter(|entry| {
                        entry.fd != PREOPEN_FD && path::is_descendant(&from, &entry.path)
                    })
                    .map(|entry| (entry.fd, format!("{}{}", to, &entry.path[from.len()..]))),
            );
        }
        for (fd, new_path) in moved {
            if let Some(entry) = self.entries.get_mut(&fd) {
                self.by_path.remove(&entry.path);
                entry.path = new_path.clone();
                self.by_path.insert(new_path, fd);
            }
        }
        // The root keeps its "/" key, so the cwd is carried along separately.
        if moving_dir && self.holds_cwd(&from) {
            let cwd = format!("{}{}", to, &self.cwd[from.len()..]);
            debug!(%from, %to, %cwd, "working directory moved");
            self.set_cwd(cwd);
        }
        Ok(())
    }

    /// Moves the entry at `from` to the fd `to`, dropping whatever was there.
    pub fn renumber(&mut self, from: Fd, to: Fd) -> Result<()> {
        if !self.entries.contains_key(&from) {
            return Err(FsError::InvalidFd);
        }
        if from == to {
            return Ok(());
        }
        if Self::is_reserved(from) || Self::is_reserved(to) {
            return Err(FsError::Unsupported);
        }
        if self.entries.contains_key(&to) {
            self.remove(to)?;
        }
        let mut entry = self.detach(from)?;
        self.claim(to);
        entry.fd = to;
        self.by_path.insert(entry.path.clone(), to);
        self.entries.insert(to, entry);
        Ok(())
    }

    /// Entries directly beneath the directory `dir`.
    pub fn children<'a>(&'a self, dir: &'a str) -> impl Iterator<Item = &'a FdEntry> + 'a {
        self.entries.values().filter(move |entry| {
            entry.fd != PREOPEN_FD
                && path::is_descendant(dir, &entry.path)
                && path::parent(&entry.path) == dir
        })
    }

    /// Whether any entry lies anywhere beneath `dir`.
    pub fn has_descendants(&self, dir: &str) -> bool {
        self.entries
            .values()
            .any(|entry| entry.fd != PREOPEN_FD && path::is_descendant(dir, &entry.path))
    }

    pub fn iter(&self) -> impl Iterator<Item = &FdEntry> {
        self.entries.values()
    }

    /// Number of entries, the four reserved ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Discards every entry and starts over with fresh standard streams, the
    /// root preopen and `/` as the working directory. stdin keeps its bytes.
    pub fn clear(&mut self) {
        let stdin = self
            .entries
            .get(&0)
            .and_then(FdEntry::file)
            .map(|file| file.as_slice().to_vec())
            .unwrap_or_default();
        self.entries.clear();
        self.by_path.clear();
        self.free.clear();
        self.next_fd = FIRST_GUEST_FD;
        self.cwd = "/".to_string();
        self.seed_reserved(stdin);
    }

    /// Replaces what the guest will read from stdin.
    pub fn set_stdin(&mut self, bytes: impl Into<Vec<u8>>) {
        if let Some(stdin) = self.entries.get_mut(&0) {
            stdin.replace_content(bytes.into());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn file() -> Kind {
        Kind::File(FileBuffer::new())
    }

    #[test]
    fn test_reserved_entries() {
        let table = FdTable::new();
        assert_eq!(table.len(), 4);
        assert_eq!(table.find_by_path("/dev/stdin"), Some(0));
        assert_eq!(table.find_by_path("/dev/stdout"), Some(1));
        assert_eq!(table.find_by_path("/dev/stderr"), Some(2));
        assert_eq!(table.find_by_path("/"), Some(PREOPEN_FD));
        assert!(table.get(PREOPEN_FD).unwrap().is_dir());
        assert!(table.get(1).unwrap().is_stdio());
    }

    #[test]
    fn test_allocate_lowest_free() {
        let mut table = FdTable::new();
        let a = table.insert("/a", file()).unwrap();
        let b = table.insert("/b", file()).unwrap();
        let c = table.insert("/c", file()).unwrap();
        assert_eq!((a, b, c), (4, 5, 6));

        table.remove(b).unwrap();
        table.remove(a).unwrap();
        assert_eq!(table.insert("/d", file()).unwrap(), 4);
        assert_eq!(table.insert("/e", file()).unwrap(), 5);
        assert_eq!(table.insert("/f", file()).unwrap(), 7);

        table.remove(7).unwrap();
        table.remove(6).unwrap();
        assert_eq!(table.insert("/g", file()).unwrap(), 6);
    }

    #[test]
    fn test_path_is_unique() {
        let mut table = FdTable::new();
        let fd = table.insert("/x/y.txt", file()).unwrap();
        assert_eq!(table.insert("/x/./y.txt", file()), Err(FsError::AlreadyExists));
        assert_eq!(table.insert("/x/z/../y.txt", Kind::Dir), Err(FsError::AlreadyExists));
        assert_eq!(table.find_by_path("x//y.txt"), Some(fd));
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn test_reserved_cannot_be_removed() {
        let mut table = FdTable::new();
        for fd in 0..=PREOPEN_FD {
            assert_eq!(table.remove(fd).unwrap_err(), FsError::PermissionDenied);
        }
        assert_eq!(table.remove(42).unwrap_err(), FsError::InvalidFd);
    }

    #[test]
    fn test_rename_file_replaces_target() {
        let mut table = FdTable::new();
        let a = table.insert("/a", file()).unwrap();
        let b = table.insert("/b", file()).unwrap();
        table.rename("/a", "/b").unwrap();
        assert_eq!(table.find_by_path("/b"), Some(a));
        assert_eq!(table.find_by_path("/a"), None);
        assert!(table.get(b).is_none());
        assert_eq!(table.get(a).unwrap().path, "/b");
    }

    #[test]
    fn test_rename_dir_moves_children() {
        let mut table = FdTable::new();
        table.insert("/src", Kind::Dir).unwrap();
        let inner = table.insert("/src/inner.txt", file()).unwrap();
        table.rename("/src", "/dst").unwrap();
        assert_eq!(table.find_by_path("/dst/inner.txt"), Some(inner));
        assert!(table.is_dir("/dst"));
        assert!(!table.has_descendants("/src"));
        assert_eq!(table.rename("/dst", "/dst/sub"), Err(FsError::InvalidInput));
    }

    #[test]
    #[tracing_test::traced_test]
    fn test_rename_carries_cwd() {
        let mut table = FdTable::new();
        table.insert("/sub", Kind::Dir).unwrap();
        let inner = table.insert("/sub/inner", Kind::Dir).unwrap();
        table.set_cwd("/sub/inner".to_string());

        table.rename("/sub", "/dst").unwrap();
        assert_eq!(table.current_dir(), "/dst/inner");
        assert_eq!(table.get(PREOPEN_FD).unwrap().path, "/dst/inner");
        assert_eq!(table.find_by_path("/"), Some(PREOPEN_FD));
        assert_eq!(table.find_by_path("/dst/inner"), Some(inner));
        assert_eq!(table.resolve("f.txt"), "/dst/inner/f.txt");
        assert!(logs_contain("working directory moved"));

        table.rename("/dst/inner", "/top").unwrap();
        assert_eq!(table.current_dir(), "/top");
        assert_eq!(table.get(PREOPEN_FD).unwrap().path, "/top");
    }

    #[test]
    fn test_cwd_cannot_be_removed() {
        let mut table = FdTable::new();
        let sub = table.insert("/sub", Kind::Dir).unwrap();
        let inner = table.insert("/sub/inner", Kind::Dir).unwrap();
        let other = table.insert("/other", Kind::Dir).unwrap();
        table.set_cwd("/sub/inner".to_string());

        assert_eq!(table.remove(inner).unwrap_err(), FsError::ResourceBusy);
        assert_eq!(table.remove(sub).unwrap_err(), FsError::ResourceBusy);
        assert_eq!(table.rename("/other", "/sub/inner"), Err(FsError::ResourceBusy));
        assert!(table.is_dir("/other"));
        assert_eq!(table.find_by_path("/sub/inner"), Some(inner));

        table.set_cwd("/".to_string());
        table.remove(inner).unwrap();
        table.remove(other).unwrap();
    }

    #[test]
    fn test_renumber() {
        let mut table = FdTable::new();
        let a = table.insert("/a", file()).unwrap();
        table.renumber(a, 10).unwrap();
        assert_eq!(table.find_by_path("/a"), Some(10));
        assert!(table.get(a).is_none());
        // the gap left behind is handed out first
        assert_eq!(table.allocate(), 4);
        assert_eq!(table.allocate(), 5);
        assert_eq!(table.renumber(10, 1), Err(FsError::Unsupported));
        assert_eq!(table.renumber(99, 5), Err(FsError::InvalidFd));
    }

    #[test]
    fn test_children() {
        let mut table = FdTable::new();
        table.insert("/sub", Kind::Dir).unwrap();
        table.insert("/sub/a.txt", file()).unwrap();
        table.insert("/sub/deeper/b.txt", file()).unwrap();
        table.insert("/top.txt", file()).unwrap();

        let mut names: Vec<_> = table.children("/sub").map(|e| e.path.as_str()).collect();
        names.sort();
        assert_eq!(names, vec!["/sub/a.txt"]);
        assert!(table.has_descendants("/sub"));
        let root: Vec<_> = table.children("/").map(|e| e.path.as_str()).collect();
        assert_eq!(root, vec!["/sub", "/top.txt"]);
    }

    #[test]
    fn test_clear() {
        let mut table = FdTable::new();
        table.set_stdin(b"input".to_vec());
        table.insert("/sub", Kind::Dir).unwrap();
        table.set_cwd("/sub".to_string());
        table.insert("/sub/x", file()).unwrap();

        table.clear();
        assert_eq!(table.len(), 4);
        assert_eq!(table.current_dir(), "/");
        assert_eq!(table.get(PREOPEN_FD).unwrap().path, "/");
        assert_eq!(table.get(0).unwrap().file().unwrap().as_slice(), b"input");
        assert_eq!(table.allocate(), FIRST_GUEST_FD);
    }
}
