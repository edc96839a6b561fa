use super::*;
use crate::syscalls::*;

/// ### `fd_close()`
/// Close an open file descriptor
///
/// Files are not reference counted: closing only checks that `fd` names an
/// entry, which stays in the table until it is unlinked.
/// Inputs:
/// - `Fd fd`
///     A file descriptor mapping to an open file to close
/// Errors:
/// - `Errno::Badf`
///     If `fd` is invalid
#[instrument(level = "debug", skip_all, fields(%fd), ret)]
pub fn fd_close(env: &mut WasiEnv, fd: Fd) -> Errno {
    let entry = wasi_try!(env.fs.get_fd(fd));
    trace!(path = %entry.path, "close keeps the entry");
    Errno::Success
}
