use super::*;
use crate::syscalls::*;

/// ### `fd_sync()`
/// Synchronize file and metadata to disk. A no-op beyond validating `fd`.
/// Inputs:
/// - `Fd fd`
///     The file descriptor to sync
#[instrument(level = "debug", skip_all, fields(%fd), ret)]
pub fn fd_sync(env: &mut WasiEnv, fd: Fd) -> Errno {
    wasi_try!(env.fs.get_fd(fd));
    Errno::Success
}
