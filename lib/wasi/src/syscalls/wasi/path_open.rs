use super::*;
use crate::syscalls::*;

/// ### `path_open()`
/// Open file located at the given path
/// Inputs:
/// - `Fd dirfd`
///     The fd corresponding to the directory that the file is in
/// - `LookupFlags dirflags`
///     Flags specifying how the path will be resolved
/// - `char *path`
///     The path of the file or directory to open
/// - `u32 path_len`
///     The length of the `path` string
/// - `Oflags o_flags`
///     How the file will be opened
/// - `Rights fs_rights_base`
///     The rights of the created file descriptor
/// - `Rights fs_rightsinheriting`
///     The rights of file descriptors derived from the created file descriptor
/// - `Fdflags fs_flags`
///     The flags of the file descriptor
/// Output:
/// - `Fd* fd`
///     The new file descriptor
///
/// An existing entry keeps its descriptor: opening the same path twice
/// returns the same fd, and resets its cursor. When nothing exists at the
/// path and `CREATE` was not given, `0xffffffff` is written to `fd`.
/// Rights are accepted but not enforced.
#[instrument(level = "debug", skip_all, fields(%dirfd, path = field::Empty, follow_symlinks = field::Empty, ret_fd = field::Empty), ret)]
#[allow(clippy::too_many_arguments)]
pub fn path_open(
    env: &mut WasiEnv,
    dirfd: Fd,
    dirflags: Lookupflags,
    path: WasmPtr<u8>,
    path_len: u32,
    o_flags: Oflags,
    fs_rights_base: Rights,
    fs_rights_inheriting: Rights,
    fs_flags: Fdflags,
    fd: WasmPtr<Fd>,
) -> Errno {
    if dirflags.contains(Lookupflags::SYMLINK_FOLLOW) {
        Span::current().record("follow_symlinks", true);
    }
    trace!(?fs_rights_base, ?fs_rights_inheriting, "rights are not enforced");

    let (mut memory, fs) = wasi_try_mem!(env.memory_and_fs());
    let path_string = wasi_try!(read_path(&memory, path, path_len));
    Span::current().record("path", path_string.as_str());

    let resolved = wasi_try!(resolve_at(fs, dirfd, &path_string));
    let out_fd = match open_resolved(fs, &resolved, o_flags, fs_flags) {
        Ok(out_fd) => out_fd,
        Err(Errno::Noent) => {
            let _ = fd.write(&mut memory, INVALID_FD);
            return Errno::Noent;
        }
        Err(errno) => return errno,
    };

    Span::current().record("ret_fd", out_fd);
    wasi_try_mem!(fd.write(&mut memory, out_fd));

    Errno::Success
}

fn open_resolved(
    fs: &mut FdTable,
    resolved: &str,
    o_flags: Oflags,
    fs_flags: Fdflags,
) -> Result<Fd, Errno> {
    let want_dir = o_flags.contains(Oflags::DIRECTORY);

    let existing = match fs.find_by_path(resolved) {
        Some(existing) => existing,
        None => {
            if want_dir {
                // directories are made with `path_create_directory`
                return Err(Errno::Noent);
            }
            if !o_flags.contains(Oflags::CREATE) {
                return Err(Errno::Noent);
            }
            let new_fd = fs
                .insert(resolved, Kind::File(Default::default()))
                .map_err(Errno::from)?;
            let entry = fs.get_fd_mut(new_fd).map_err(Errno::from)?;
            entry.fdflags = fs_flags;
            debug!(%new_fd, path = %resolved, "created file");
            return Ok(new_fd);
        }
    };

    let entry = fs.get_fd_mut(existing).map_err(Errno::from)?;
    if entry.is_dir() && !want_dir {
        return Err(Errno::Isdir);
    }
    if !entry.is_dir() && want_dir {
        return Err(Errno::Notdir);
    }
    if o_flags.contains(Oflags::CREATE | Oflags::EXCL) {
        return Err(Errno::Exist);
    }

    if o_flags.contains(Oflags::TRUNC) {
        if let Some(file) = entry.file_mut() {
            file.truncate();
            entry.modified = memfs_virtual_fs::now_ns();
        }
    }
    entry.seek_position = 0;
    entry.fdflags = fs_flags;

    Ok(existing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reopening_keeps_the_descriptor() {
        let mut fs = FdTable::new();
        let fd = open_resolved(&mut fs, "/a.txt", Oflags::CREATE, Fdflags::empty()).unwrap();
        fs.get_mut(fd).unwrap().seek_position = 7;

        let again = open_resolved(&mut fs, "/a.txt", Oflags::empty(), Fdflags::APPEND).unwrap();
        assert_eq!(again, fd);
        let entry = fs.get(fd).unwrap();
        assert_eq!(entry.seek_position, 0);
        assert!(entry.fdflags.contains(Fdflags::APPEND));
    }

    #[test]
    fn exclusive_create_refuses_existing() {
        let mut fs = FdTable::new();
        open_resolved(&mut fs, "/a.txt", Oflags::CREATE, Fdflags::empty()).unwrap();
        assert_eq!(
            open_resolved(&mut fs, "/a.txt", Oflags::CREATE | Oflags::EXCL, Fdflags::empty()),
            Err(Errno::Exist)
        );
    }

    #[test]
    fn truncate_clears_contents() {
        let mut fs = FdTable::new();
        let fd = fs.write_file("/a.txt", b"0123456789".to_vec()).unwrap();
        let again = open_resolved(&mut fs, "/a.txt", Oflags::TRUNC, Fdflags::empty()).unwrap();
        assert_eq!(again, fd);
        assert_eq!(fs.read_file("/a.txt"), Some(&b""[..]));
    }

    #[test]
    fn directory_flag_mismatches() {
        let mut fs = FdTable::new();
        fs.mkdir("/d").unwrap();
        fs.write_file("/f", b"x".to_vec()).unwrap();

        assert_eq!(
            open_resolved(&mut fs, "/d", Oflags::empty(), Fdflags::empty()),
            Err(Errno::Isdir)
        );
        assert_eq!(
            open_resolved(&mut fs, "/f", Oflags::DIRECTORY, Fdflags::empty()),
            Err(Errno::Notdir)
        );
        assert_eq!(
            open_resolved(&mut fs, "/nope", Oflags::DIRECTORY | Oflags::CREATE, Fdflags::empty()),
            Err(Errno::Noent)
        );
        assert!(open_resolved(&mut fs, "/d", Oflags::DIRECTORY, Fdflags::empty()).is_ok());
    }
}
