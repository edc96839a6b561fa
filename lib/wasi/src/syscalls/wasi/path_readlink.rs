use super::*;
use crate::syscalls::*;

/// ### `path_readlink()`
/// Read the value of a symlink. Not supported; there are no symlinks.
/// Inputs:
/// - `Fd dir_fd`
///     The base directory from which `path` is understood
/// - `const char *path`
///     Pointer to UTF-8 bytes that make up the path to the symlink
/// - `u32 path_len`
///     The number of bytes to read from `path`
/// - `u8 *buf`
///     Pointer to available space to write the contents of the link
/// - `u32 buf_len`
///     The amount of space available in `buf`
/// Output:
/// - `u32 *buf_used`
///     The number of bytes written to `buf`
#[instrument(level = "trace", skip_all, fields(%dir_fd, %buf_len), ret)]
pub fn path_readlink(
    _env: &mut WasiEnv,
    dir_fd: Fd,
    _path: WasmPtr<u8>,
    _path_len: u32,
    _buf: WasmPtr<u8>,
    buf_len: u32,
    _buf_used: WasmPtr<u32>,
) -> Errno {
    Errno::Nosys
}
