use super::*;
use crate::syscalls::*;

/// ### `path_remove_directory()`
/// Remove an empty directory
/// Inputs:
/// - `Fd fd`
///     The directory that `path` is relative to
/// - `const char *path`
///     String containing the directory path
/// - `u32 path_len`
///     The length of `path`
#[instrument(level = "trace", skip_all, fields(%fd, path = field::Empty), ret)]
pub fn path_remove_directory(env: &mut WasiEnv, fd: Fd, path: WasmPtr<u8>, path_len: u32) -> Errno {
    let (memory, fs) = wasi_try_mem!(env.memory_and_fs());
    let base_path = wasi_try!(read_path(&memory, path, path_len));
    Span::current().record("path", base_path.as_str());

    let resolved = wasi_try!(resolve_at(fs, fd, &base_path));
    let entry = wasi_try!(fs.entry_at(&resolved); Errno::Noent);
    if !entry.is_dir() {
        return Errno::Notdir;
    }
    let target = entry.fd;
    if FdTable::is_reserved(target) {
        return Errno::Perm;
    }
    if fs.has_descendants(&resolved) {
        return Errno::Notempty;
    }
    wasi_try!(fs.remove(target));

    Errno::Success
}
