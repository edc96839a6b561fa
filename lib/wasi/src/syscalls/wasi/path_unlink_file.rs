use super::*;
use crate::syscalls::*;

/// ### `path_unlink_file()`
/// Unlink a file, deleting if the number of hardlinks is 1
/// Inputs:
/// - `Fd fd`
///     The base file descriptor from which the path is understood
/// - `const char *path`
///     Array of UTF-8 bytes representing the path
/// - `u32 path_len`
///     The number of bytes in the `path` array
#[instrument(level = "trace", skip_all, fields(%fd, path = field::Empty), ret)]
pub fn path_unlink_file(env: &mut WasiEnv, fd: Fd, path: WasmPtr<u8>, path_len: u32) -> Errno {
    let (memory, fs) = wasi_try_mem!(env.memory_and_fs());
    let base_path = wasi_try!(read_path(&memory, path, path_len));
    Span::current().record("path", base_path.as_str());

    let resolved = wasi_try!(resolve_at(fs, fd, &base_path));
    let entry = wasi_try!(fs.entry_at(&resolved); Errno::Noent);
    if entry.is_dir() {
        return Errno::Isdir;
    }
    let target = entry.fd;
    wasi_try!(fs.remove(target));

    Errno::Success
}
