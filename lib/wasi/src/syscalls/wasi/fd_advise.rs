use super::*;
use crate::syscalls::*;

/// ### `fd_advise()`
/// Advise the system about how a file will be used.
/// Not supported; files live in memory.
/// Inputs:
/// - `Fd fd`
///     The file descriptor the advice applies to
/// - `Filesize offset`
///     The offset from which the advice applies
/// - `Filesize len`
///     The length from the offset to which the advice applies
/// - `__wasi_advice_t advice`
///     The advice to give
#[instrument(level = "trace", skip_all, fields(%fd, %offset, %len, %advice), ret)]
pub fn fd_advise(_env: &mut WasiEnv, fd: Fd, offset: Filesize, len: Filesize, advice: u8) -> Errno {
    Errno::Nosys
}
