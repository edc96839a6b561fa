use super::*;
use crate::syscalls::*;

/// ### `fd_prestat_dir_name()`
/// Get the name of the preopened directory, which is the current working
/// directory. The name is not NUL-terminated.
/// Inputs:
/// - `Fd fd`
///     The preopened file descriptor
/// - `u8 *path`
///     Where the name is written
/// - `u32 path_len`
///     The space available at `path`
#[instrument(level = "trace", skip_all, fields(%fd, path = field::Empty), ret)]
pub fn fd_prestat_dir_name(env: &mut WasiEnv, fd: Fd, path: WasmPtr<u8>, path_len: u32) -> Errno {
    if fd != PREOPEN_FD {
        return Errno::Badf;
    }
    let (mut memory, fs) = wasi_try_mem!(env.memory_and_fs());
    let entry = wasi_try!(fs.get_fd(fd));
    Span::current().record("path", entry.path.as_str());

    let name = entry.path.as_bytes();
    if name.len() > path_len as usize {
        return Errno::Nametoolong;
    }
    wasi_try_mem!(memory.write_bytes(path.offset(), name));

    Errno::Success
}
