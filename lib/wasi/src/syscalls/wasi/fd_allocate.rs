use super::*;
use crate::syscalls::*;

/// ### `fd_allocate()`
/// Allocate extra space for a file descriptor. Not supported.
/// Inputs:
/// - `Fd fd`
///     The file descriptor to allocate for
/// - `Filesize offset`
///     The offset from the start marking the beginning of the allocation
/// - `Filesize len`
///     The length from the offset marking the end of the allocation
#[instrument(level = "trace", skip_all, fields(%fd, %offset, %len), ret)]
pub fn fd_allocate(_env: &mut WasiEnv, fd: Fd, offset: Filesize, len: Filesize) -> Errno {
    Errno::Nosys
}
