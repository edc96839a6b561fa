use super::*;
use crate::syscalls::*;

/// ### `path_link()`
/// Create a hard link. Not supported.
/// Inputs:
/// - `Fd old_fd`
///     The directory relative to which the `old_path` is
/// - `LookupFlags old_flags`
///     Flags to control how the path is understood
/// - `const char *old_path`
///     String containing the old file path
/// - `u32 old_path_len`
///     Length of the `old_path` string
/// - `Fd new_fd`
///     The directory relative to which the `new_path` is
/// - `const char *new_path`
///     String containing the new file path
/// - `u32 old_path_len`
///     Length of the `new_path` string
#[instrument(level = "trace", skip_all, fields(%old_fd, %new_fd), ret)]
pub fn path_link(
    _env: &mut WasiEnv,
    old_fd: Fd,
    _old_flags: Lookupflags,
    _old_path: WasmPtr<u8>,
    _old_path_len: u32,
    new_fd: Fd,
    _new_path: WasmPtr<u8>,
    _new_path_len: u32,
) -> Errno {
    Errno::Nosys
}
