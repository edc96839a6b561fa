use super::*;
use crate::syscalls::*;

/// ### `path_symlink()`
/// Create a symlink. Not supported.
/// Inputs:
/// - `const char *old_path`
///     Array of UTF-8 bytes representing the source path
/// - `u32 old_path_len`
///     The number of bytes to read from `old_path`
/// - `Fd fd`
///     The base directory from which the paths are understood
/// - `const char *new_path`
///     Array of UTF-8 bytes representing the target path
/// - `u32 new_path_len`
///     The number of bytes to read from `new_path`
#[instrument(level = "trace", skip_all, fields(%fd), ret)]
pub fn path_symlink(
    _env: &mut WasiEnv,
    _old_path: WasmPtr<u8>,
    _old_path_len: u32,
    fd: Fd,
    _new_path: WasmPtr<u8>,
    _new_path_len: u32,
) -> Errno {
    Errno::Nosys
}
