use super::*;
use crate::syscalls::*;

/// ### `fd_read()`
/// Read data from file descriptor
/// Inputs:
/// - `Fd fd`
///     File descriptor from which data will be read
/// - `const __wasi_iovec_t *iovs`
///     Vectors where data will be stored
/// - `u32 iovs_len`
///     Length of data in `iovs`
/// Output:
/// - `u32 *nread`
///     Number of bytes read
///
#[instrument(level = "trace", skip_all, fields(%fd, nread = field::Empty), ret)]
pub fn fd_read(
    env: &mut WasiEnv,
    fd: Fd,
    iovs: WasmPtr<Iovec>,
    iovs_len: u32,
    nread: WasmPtr<u32>,
) -> Errno {
    fd_read_internal(env, fd, iovs, iovs_len, None, nread)
}

/// ### `fd_pread()`
/// Read from the file at the given offset without updating the file cursor.
/// This acts like a stateless version of Seek + Read
/// Inputs:
/// - `Fd fd`
///     The file descriptor to read the data with
/// - `const __wasi_iovec_t* iovs'
///     Vectors where the data will be stored
/// - `size_t iovs_len`
///     The number of vectors to store the data into
/// - `Filesize offset`
///     The file cursor to use: the starting position from which data will be read
/// Output:
/// - `size_t nread`
///     The number of bytes read
#[instrument(level = "trace", skip_all, fields(%fd, %offset, nread = field::Empty), ret)]
pub fn fd_pread(
    env: &mut WasiEnv,
    fd: Fd,
    iovs: WasmPtr<Iovec>,
    iovs_len: u32,
    offset: Filesize,
    nread: WasmPtr<u32>,
) -> Errno {
    fd_read_internal(env, fd, iovs, iovs_len, Some(offset), nread)
}

fn fd_read_internal(
    env: &mut WasiEnv,
    fd: Fd,
    iovs: WasmPtr<Iovec>,
    iovs_len: u32,
    offset: Option<Filesize>,
    nread: WasmPtr<u32>,
) -> Errno {
    let (mut memory, fs) = wasi_try_mem!(env.memory_and_fs());

    let entry = match fs.get_mut(fd) {
        Some(entry)
            if entry.is_file() && fd != __WASI_STDOUT_FILENO && fd != __WASI_STDERR_FILENO =>
        {
            entry
        }
        _ => {
            let _ = nread.write(&mut memory, 0);
            return Errno::Badf;
        }
    };
    if offset.is_some() && entry.is_stdio() {
        let _ = nread.write(&mut memory, 0);
        return Errno::Spipe;
    }

    let iovs = wasi_try_mem!(iovs.read_array(&memory, iovs_len));
    let file = wasi_try!(entry.file(); Errno::Badf);

    let mut position = offset.unwrap_or(entry.seek_position);
    let mut bytes_read = 0u32;
    for iov in iovs {
        let buf = wasi_try_mem!(memory.slice_mut(iov.buf, iov.buf_len));
        let wanted = buf.len();
        let read = file.read_at(position, buf);
        position += read as u64;
        bytes_read = bytes_read.saturating_add(read as u32);
        if read < wanted {
            break;
        }
    }

    if offset.is_none() {
        entry.seek_position = position;
    }
    entry.accessed = memfs_virtual_fs::now_ns();

    Span::current().record("nread", bytes_read);
    wasi_try_mem!(nread.write(&mut memory, bytes_read));

    Errno::Success
}
