use super::*;
use crate::syscalls::*;

/// ### `fd_filestat_set_size()`
/// Change the size of an open file, zeroing out any new bytes
/// Inputs:
/// - `Fd fd`
///     File descriptor to adjust
/// - `Filesize st_size`
///     New size that `fd` will be set to
#[instrument(level = "debug", skip_all, fields(%fd, %st_size), ret)]
pub fn fd_filestat_set_size(env: &mut WasiEnv, fd: Fd, st_size: Filesize) -> Errno {
    let entry = wasi_try!(env.fs.get_fd_mut(fd));
    if entry.is_dir() {
        return Errno::Isdir;
    }
    if entry.is_stdio() {
        return Errno::Inval;
    }

    let file = wasi_try!(entry.file_mut(); Errno::Badf);
    wasi_try!(file.set_len(st_size));
    entry.modified = memfs_virtual_fs::now_ns();

    Errno::Success
}
