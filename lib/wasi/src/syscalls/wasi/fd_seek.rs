use super::*;
use crate::syscalls::*;

/// ### `fd_seek()`
/// Update file descriptor offset
/// Inputs:
/// - `Fd fd`
///     File descriptor to mutate
/// - `FileDelta offset`
///     Number of bytes to adjust offset by
/// - `Whence whence`
///     What the offset is relative to
/// Output:
/// - `Filesize *fd`
///     The new offset relative to the start of the file
#[instrument(level = "trace", skip_all, fields(%fd, %offset, %whence), ret)]
pub fn fd_seek(
    env: &mut WasiEnv,
    fd: Fd,
    offset: FileDelta,
    whence: u8,
    newoffset: WasmPtr<Filesize>,
) -> Errno {
    let (mut memory, fs) = wasi_try_mem!(env.memory_and_fs());
    let entry = wasi_try!(fs.get_fd_mut(fd));
    if entry.is_dir() {
        return Errno::Badf;
    }
    if entry.is_stdio() {
        return Errno::Spipe;
    }

    let whence = wasi_try!(Whence::try_from(whence).map_err(|_| Errno::Inval));
    let base = match whence {
        Whence::Set => 0,
        Whence::Cur => entry.seek_position,
        Whence::End => entry.len(),
    };
    // seeking before the start leaves the cursor where it was
    let new_offset = wasi_try!(base.checked_add_signed(offset); Errno::Inval);
    entry.seek_position = new_offset;

    wasi_try_mem!(newoffset.write(&mut memory, new_offset));

    Errno::Success
}
