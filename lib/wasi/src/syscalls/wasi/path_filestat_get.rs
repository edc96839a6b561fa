use super::*;
use crate::syscalls::*;

/// ### `path_filestat_get()`
/// Access metadata about a file or directory
/// Inputs:
/// - `Fd fd`
///     The directory that `path` is relative to
/// - `LookupFlags flags`
///     Flags to control how `path` is understood
/// - `const char *path`
///     String containing the file path
/// - `u32 path_len`
///     The length of the `path` string
/// Output:
/// - `__wasi_file_stat_t *buf`
///     The location where the metadata will be stored
#[instrument(level = "trace", skip_all, fields(%fd, path = field::Empty), ret)]
pub fn path_filestat_get(
    env: &mut WasiEnv,
    fd: Fd,
    flags: Lookupflags,
    path: WasmPtr<u8>,
    path_len: u32,
    buf: WasmPtr<Filestat>,
) -> Errno {
    let (mut memory, fs) = wasi_try_mem!(env.memory_and_fs());
    let path_string = wasi_try!(read_path(&memory, path, path_len));
    Span::current().record("path", path_string.as_str());
    trace!(?flags);

    let resolved = wasi_try!(resolve_at(fs, fd, &path_string));
    let entry = wasi_try!(fs.entry_at(&resolved); Errno::Noent);
    let stat = filestat_of(entry);

    wasi_try_mem!(buf.write(&mut memory, stat));

    Errno::Success
}
