use super::*;
use crate::syscalls::*;

/// ### `fd_filestat_get()`
/// Get the metadata of an open file
/// Input:
/// - `Fd fd`
///     The open file descriptor whose metadata will be read
/// Output:
/// - `Filestat *buf`
///     Where the metadata from `fd` will be written
#[instrument(level = "debug", skip_all, fields(%fd), ret)]
pub fn fd_filestat_get(env: &mut WasiEnv, fd: Fd, buf: WasmPtr<Filestat>) -> Errno {
    let (mut memory, fs) = wasi_try_mem!(env.memory_and_fs());
    let entry = wasi_try!(fs.get_fd(fd));
    let stat = filestat_of(entry);

    wasi_try_mem!(buf.write(&mut memory, stat));

    Errno::Success
}
