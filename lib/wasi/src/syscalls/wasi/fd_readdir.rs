use super::*;
use crate::syscalls::*;

/// ### `fd_readdir()`
/// Read data from directory specified by file descriptor. Not supported;
/// directory listings are only available to the host.
/// Inputs:
/// - `Fd fd`
///     File descriptor from which directory data will be read
/// - `void *buf`
///     Buffer where directory entries are stored
/// - `u32 buf_len`
///     Length of data in `buf`
/// - `Dircookie cookie`
///     Where the directory reading should start from
/// Output:
/// - `u32 *bufused`
///     The Number of bytes stored in `buf`; if less than `buf_len` then entire
///     directory has been read
#[instrument(level = "trace", skip_all, fields(%fd, %buf_len, %cookie), ret)]
pub fn fd_readdir(
    _env: &mut WasiEnv,
    fd: Fd,
    _buf: WasmPtr<u8>,
    buf_len: u32,
    cookie: u64,
    _bufused: WasmPtr<u32>,
) -> Errno {
    Errno::Nosys
}
