use super::*;
use crate::syscalls::*;

/// ### `path_rename()`
/// Rename a file or directory
/// Inputs:
/// - `Fd old_fd`
///     The base directory for `old_path`
/// - `const char* old_path`
///     Pointer to UTF8 bytes, the file to be renamed
/// - `u32 old_path_len`
///     The number of bytes to read from `old_path`
/// - `Fd new_fd`
///     The base directory for `new_path`
/// - `const char* new_path`
///     Pointer to UTF8 bytes, the new file name
/// - `u32 new_path_len`
///     The number of bytes to read from `new_path`
#[instrument(level = "debug", skip_all, fields(%old_fd, %new_fd, old_path = field::Empty, new_path = field::Empty), ret)]
pub fn path_rename(
    env: &mut WasiEnv,
    old_fd: Fd,
    old_path: WasmPtr<u8>,
    old_path_len: u32,
    new_fd: Fd,
    new_path: WasmPtr<u8>,
    new_path_len: u32,
) -> Errno {
    let (memory, fs) = wasi_try_mem!(env.memory_and_fs());
    let source_str = wasi_try!(read_path(&memory, old_path, old_path_len));
    Span::current().record("old_path", source_str.as_str());
    let target_str = wasi_try!(read_path(&memory, new_path, new_path_len));
    Span::current().record("new_path", target_str.as_str());

    let source = wasi_try!(resolve_at(fs, old_fd, &source_str));
    let target = wasi_try!(resolve_at(fs, new_fd, &target_str));
    if fs.find_by_path(&source).is_none() {
        return Errno::Noent;
    }
    if source == target {
        return Errno::Success;
    }
    wasi_try!(fs.rename(&source, &target));

    Errno::Success
}
