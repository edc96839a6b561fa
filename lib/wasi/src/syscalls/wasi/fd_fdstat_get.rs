use super::*;
use crate::syscalls::*;

/// ### `fd_fdstat_get()`
/// Get metadata of a file descriptor
/// Input:
/// - `Fd fd`
///     The file descriptor whose metadata will be accessed
/// Output:
/// - `Fdstat *buf`
///     The location where the metadata will be written
#[instrument(level = "trace", skip_all, fields(%fd), ret)]
pub fn fd_fdstat_get(env: &mut WasiEnv, fd: Fd, buf_ptr: WasmPtr<Fdstat>) -> Errno {
    let (mut memory, fs) = wasi_try_mem!(env.memory_and_fs());
    let entry = wasi_try!(fs.get_fd(fd));

    let (fs_rights_base, fs_rights_inheriting) = if entry.is_dir() {
        (Rights::directory_base(), Rights::directory_inheriting())
    } else {
        (Rights::regular_file_base(), Rights::regular_file_inheriting())
    };
    let stat = Fdstat {
        fs_filetype: filetype_of(entry),
        fs_flags: entry.fdflags,
        fs_rights_base,
        fs_rights_inheriting,
    };

    wasi_try_mem!(buf_ptr.write(&mut memory, stat));

    Errno::Success
}
