use super::*;
use crate::syscalls::*;

/// ### `fd_prestat_get()`
/// Get metadata about a preopened file descriptor
/// Input:
/// - `Fd fd`
///     The preopened file descriptor to query
/// Output:
/// - `__wasi_prestat *buf`
///     Where the metadata will be written
#[instrument(level = "trace", skip_all, fields(%fd), ret)]
pub fn fd_prestat_get(env: &mut WasiEnv, fd: Fd, buf: WasmPtr<Prestat>) -> Errno {
    if fd != PREOPEN_FD {
        return Errno::Badf;
    }
    let (mut memory, fs) = wasi_try_mem!(env.memory_and_fs());
    let entry = wasi_try!(fs.get_fd(fd));
    let prestat = Prestat::dir(entry.path.len() as u32);

    wasi_try_mem!(buf.write(&mut memory, prestat));

    Errno::Success
}
