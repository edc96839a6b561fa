//! One handler per `wasi_snapshot_preview1` import.
//!
//! Handlers are total: whatever the guest passes, they return an [`Errno`]
//! and never panic.

pub mod wasi;

pub use self::wasi::*;

pub(crate) use memfs_virtual_fs::{path as vpath, FdEntry, FdTable, Kind, PREOPEN_FD};
pub(crate) use memfs_wasi_types::*;
pub(crate) use tracing::{debug, field, instrument, trace, warn, Span};

pub(crate) use crate::{console::ConsoleStream, memory::MemoryView, WasiEnv, WasmPtr};

/// Resolution reported for every clock, in nanoseconds.
pub(crate) const CLOCK_RESOLUTION_NS: Timestamp = 1_000;

/// Written to the fd out-pointer when `path_open` finds nothing to open.
pub(crate) const INVALID_FD: Fd = u32::MAX;

/// Reads a guest string argument.
pub(crate) fn read_path(
    memory: &MemoryView<'_>,
    path: WasmPtr<u8>,
    path_len: u32,
) -> Result<String, Errno> {
    memory
        .read_utf8(path.offset(), path_len)
        .map_err(crate::mem_error_to_wasi)
}

/// Resolves a guest path relative to the directory `dirfd`.
///
/// The preopen resolves against the working directory, any other directory
/// against its own path. Paths that climb above the root or name a reserved
/// sidecar entry are refused with `Badf`.
pub(crate) fn resolve_at(fs: &FdTable, dirfd: Fd, path: &str) -> Result<String, Errno> {
    let base = if dirfd == PREOPEN_FD {
        fs.current_dir()
    } else {
        let entry = fs.get(dirfd).ok_or(Errno::Badf)?;
        if !entry.is_dir() {
            return Err(Errno::Notdir);
        }
        entry.path.as_str()
    };
    vpath::resolve_guarded(base, path).ok_or_else(|| {
        debug!(%dirfd, %path, "refusing path outside the sandbox");
        Errno::Badf
    })
}

pub(crate) fn filetype_of(entry: &FdEntry) -> Filetype {
    if entry.is_dir() {
        Filetype::Directory
    } else if entry.is_stdio() {
        Filetype::CharacterDevice
    } else {
        Filetype::RegularFile
    }
}

pub(crate) fn filestat_of(entry: &FdEntry) -> Filestat {
    Filestat {
        st_dev: 0,
        st_ino: entry.fd as Inode,
        st_filetype: filetype_of(entry),
        st_nlink: 1,
        st_size: entry.len(),
        st_atim: entry.accessed,
        st_mtim: entry.modified,
        st_ctim: entry.created,
    }
}

/// Applies `fd_filestat_set_times`-style updates to an entry.
pub(crate) fn set_times(
    entry: &mut FdEntry,
    st_atim: Timestamp,
    st_mtim: Timestamp,
    fst_flags: Fstflags,
) -> Result<(), Errno> {
    if (fst_flags.contains(Fstflags::SET_ATIM) && fst_flags.contains(Fstflags::SET_ATIM_NOW))
        || (fst_flags.contains(Fstflags::SET_MTIM) && fst_flags.contains(Fstflags::SET_MTIM_NOW))
    {
        return Err(Errno::Inval);
    }
    let now = memfs_virtual_fs::now_ns();
    if fst_flags.contains(Fstflags::SET_ATIM) {
        entry.accessed = st_atim;
    } else if fst_flags.contains(Fstflags::SET_ATIM_NOW) {
        entry.accessed = now;
    }
    if fst_flags.contains(Fstflags::SET_MTIM) {
        entry.modified = st_mtim;
    } else if fst_flags.contains(Fstflags::SET_MTIM_NOW) {
        entry.modified = now;
    }
    Ok(())
}

/// Writes `from` as consecutive NUL-terminated strings starting at `buffer`,
/// and a pointer to each into `ptr_buffer`.
#[must_use]
pub(crate) fn write_buffer_array(
    memory: &mut MemoryView<'_>,
    from: &[Vec<u8>],
    ptr_buffer: WasmPtr<u32>,
    buffer: WasmPtr<u8>,
) -> Errno {
    let mut current_buffer_offset = 0u32;
    for (i, sub_buffer) in from.iter().enumerate() {
        let ptr = wasi_try_mem!(ptr_buffer.add(i as u32));
        let addr = wasi_try_mem!(buffer.add(current_buffer_offset));
        wasi_try_mem!(ptr.write(memory, addr.offset()));

        wasi_try_mem!(memory.write_bytes(addr.offset(), sub_buffer));
        let nul = wasi_try_mem!(addr.add(sub_buffer.len() as u32));
        wasi_try_mem!(nul.write(memory, 0u8));

        current_buffer_offset = wasi_try!(current_buffer_offset
            .checked_add(sub_buffer.len() as u32 + 1)
            .ok_or(Errno::Overflow));
    }

    Errno::Success
}

/// `KEY=VALUE` byte strings, in the order the variables were configured.
pub(crate) fn environ_entries(envs: &[(String, Vec<u8>)]) -> Vec<Vec<u8>> {
    envs.iter()
        .map(|(key, value)| {
            let mut entry = Vec::with_capacity(key.len() + 1 + value.len());
            entry.extend_from_slice(key.as_bytes());
            entry.push(b'=');
            entry.extend_from_slice(value);
            entry
        })
        .collect()
}

/// Sizes reported by `args_sizes_get` and `environ_sizes_get`.
pub(crate) fn buffer_array_sizes(from: &[Vec<u8>]) -> (u32, u32) {
    let count = from.len() as u32;
    let size = from.iter().map(|item| item.len() as u32 + 1).sum();
    (count, size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    #[tracing_test::traced_test]
    fn resolve_at_refuses_escapes() {
        let mut fs = FdTable::new();
        let dir = fs.mkdir("/a").unwrap();
        let file = fs.write_file("/a/f", b"x".to_vec()).unwrap();

        assert_eq!(resolve_at(&fs, PREOPEN_FD, "a/./f"), Ok("/a/f".to_string()));
        assert_eq!(resolve_at(&fs, dir, "../b"), Ok("/b".to_string()));
        assert_eq!(resolve_at(&fs, dir, "../../b"), Err(Errno::Badf));
        assert!(logs_contain("refusing path outside the sandbox"));
        assert_eq!(resolve_at(&fs, file, "x"), Err(Errno::Notdir));
        assert_eq!(resolve_at(&fs, 40, "x"), Err(Errno::Badf));
    }

    #[test]
    fn buffer_array_layout() {
        let items = vec![b"ab".to_vec(), b"".to_vec()];
        assert_eq!(buffer_array_sizes(&items), (2, 4));
        assert_eq!(
            environ_entries(&[("K".to_string(), b"v=1".to_vec())]),
            vec![b"K=v=1".to_vec()]
        );
    }

    #[test]
    fn set_times_now_flags() {
        let mut fs = FdTable::new();
        let fd = fs.write_file("/t", b"".to_vec()).unwrap();
        let entry = fs.get_mut(fd).unwrap();
        entry.accessed = 0;
        set_times(entry, 5, 0, Fstflags::SET_ATIM_NOW).unwrap();
        assert!(entry.accessed > 5);
        assert_eq!(
            set_times(entry, 0, 0, Fstflags::SET_MTIM | Fstflags::SET_MTIM_NOW),
            Err(Errno::Inval)
        );
    }
}
