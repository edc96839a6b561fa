use super::*;
use crate::syscalls::*;

/// ### `path_create_directory()`
/// Create directory at a path
/// Inputs:
/// - `Fd fd`
///     The directory that the path is relative to
/// - `const char *path`
///     String containing path data
/// - `u32 path_len`
///     The length of `path`
/// Errors:
/// - `Errno::Exist`
///     Something already exists at `path`
#[instrument(level = "trace", skip_all, fields(%fd, path = field::Empty), ret)]
pub fn path_create_directory(env: &mut WasiEnv, fd: Fd, path: WasmPtr<u8>, path_len: u32) -> Errno {
    let (memory, fs) = wasi_try_mem!(env.memory_and_fs());
    let path_str = wasi_try!(read_path(&memory, path, path_len));
    Span::current().record("path", path_str.as_str());

    let resolved = wasi_try!(resolve_at(fs, fd, &path_str));
    if fs.find_by_path(&resolved).is_some() {
        return Errno::Exist;
    }
    wasi_try!(fs.insert(&resolved, Kind::Dir));

    Errno::Success
}
