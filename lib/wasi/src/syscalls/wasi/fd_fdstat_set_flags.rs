use super::*;
use crate::syscalls::*;

/// ### `fd_fdstat_set_flags()`
/// Set file descriptor flags for a file descriptor. Not supported; flags
/// are fixed when the file is opened.
/// Inputs:
/// - `Fd fd`
///     The file descriptor to apply the new flags to
/// - `Fdflags flags`
///     The flags to apply to `fd`
#[instrument(level = "trace", skip_all, fields(%fd, ?flags), ret)]
pub fn fd_fdstat_set_flags(_env: &mut WasiEnv, fd: Fd, flags: Fdflags) -> Errno {
    Errno::Nosys
}
