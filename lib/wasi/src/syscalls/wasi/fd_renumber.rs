use super::*;
use crate::syscalls::*;

/// ### `fd_renumber()`
/// Atomically copy file descriptor
/// Inputs:
/// - `Fd from`
///     File descriptor to copy
/// - `Fd to`
///     Location to copy file descriptor to
#[instrument(level = "debug", skip_all, fields(%from, %to), ret)]
pub fn fd_renumber(env: &mut WasiEnv, from: Fd, to: Fd) -> Errno {
    if from == to {
        wasi_try!(env.fs.get_fd(from));
        return Errno::Success;
    }
    wasi_try!(env.fs.renumber(from, to));

    Errno::Success
}
