use super::*;
use crate::syscalls::*;

/// ### `fd_tell()`
/// Get the offset of the file descriptor
/// Inputs:
/// - `Fd fd`
///     The file descriptor to access
/// Output:
/// - `Filesize *offset`
///     The offset of `fd` relative to the start of the file
#[instrument(level = "debug", skip_all, fields(%fd, offset = field::Empty), ret)]
pub fn fd_tell(env: &mut WasiEnv, fd: Fd, offset: WasmPtr<Filesize>) -> Errno {
    let (mut memory, fs) = wasi_try_mem!(env.memory_and_fs());
    let fd_entry = wasi_try!(fs.get_fd(fd));
    if fd_entry.is_dir() {
        return Errno::Badf;
    }
    if fd_entry.is_stdio() {
        return Errno::Spipe;
    }

    let position = fd_entry.seek_position;
    Span::current().record("offset", position);
    wasi_try_mem!(offset.write(&mut memory, position));

    Errno::Success
}
