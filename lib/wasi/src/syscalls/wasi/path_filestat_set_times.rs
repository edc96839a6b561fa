use super::*;
use crate::syscalls::*;

/// ### `path_filestat_set_times()`
/// Update time metadata on a file or directory
/// Inputs:
/// - `Fd fd`
///     The directory relative to which the path is resolved
/// - `LookupFlags flags`
///     Flags to control how the path is understood
/// - `const char *path`
///     String containing the file path
/// - `u32 path_len`
///     The length of the `path` string
/// - `Timestamp st_atim`
///     The timestamp that the last accessed time attribute is set to
/// -  `Timestamp st_mtim`
///     The timestamp that the last modified time attribute is set to
/// - `Fstflags fst_flags`
///     A bitmask controlling which attributes are set
#[instrument(level = "debug", skip_all, fields(%fd, path = field::Empty, %st_atim, %st_mtim), ret)]
#[allow(clippy::too_many_arguments)]
pub fn path_filestat_set_times(
    env: &mut WasiEnv,
    fd: Fd,
    flags: Lookupflags,
    path: WasmPtr<u8>,
    path_len: u32,
    st_atim: Timestamp,
    st_mtim: Timestamp,
    fst_flags: Fstflags,
) -> Errno {
    let (memory, fs) = wasi_try_mem!(env.memory_and_fs());
    let path_string = wasi_try!(read_path(&memory, path, path_len));
    Span::current().record("path", path_string.as_str());
    trace!(?flags);

    let resolved = wasi_try!(resolve_at(fs, fd, &path_string));
    let entry = wasi_try!(fs.entry_at_mut(&resolved); Errno::Noent);
    wasi_try!(set_times(entry, st_atim, st_mtim, fst_flags));

    Errno::Success
}
