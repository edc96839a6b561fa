use super::*;
use crate::syscalls::*;

/// ### `fd_datasync()`
/// Synchronize the file data to disk. A no-op beyond validating `fd`.
/// Inputs:
/// - `Fd fd`
///     The file descriptor to sync
#[instrument(level = "debug", skip_all, fields(%fd), ret)]
pub fn fd_datasync(env: &mut WasiEnv, fd: Fd) -> Errno {
    wasi_try!(env.fs.get_fd(fd));
    Errno::Success
}
