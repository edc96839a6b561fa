use super::*;
use crate::syscalls::*;

/// ### `fd_write()`
/// Write data to the file descriptor
/// Inputs:
/// - `Fd`
///     File descriptor (opened with writing) to write to
/// - `const __wasi_ciovec_t *iovs`
///     List of vectors to read data from
/// - `u32 iovs_len`
///     Length of data in `iovs`
/// Output:
/// - `u32 *nwritten`
///     Number of bytes written
/// Errors:
///
#[instrument(level = "trace", skip_all, fields(%fd, nwritten = field::Empty), ret)]
pub fn fd_write(
    env: &mut WasiEnv,
    fd: Fd,
    iovs: WasmPtr<Ciovec>,
    iovs_len: u32,
    nwritten: WasmPtr<u32>,
) -> Errno {
    fd_write_internal(env, fd, iovs, iovs_len, None, nwritten)
}

/// ### `fd_pwrite()`
/// Write to a file without adjusting its offset
/// Inputs:
/// - `Fd`
///     File descriptor (opened with writing) to write to
/// - `const __wasi_ciovec_t *iovs`
///     List of vectors to read data from
/// - `u32 iovs_len`
///     Length of data in `iovs`
/// - `Filesize offset`
///     The offset to write at
/// Output:
/// - `u32 *nwritten`
///     Number of bytes written
#[instrument(level = "trace", skip_all, fields(%fd, %offset, nwritten = field::Empty), ret)]
pub fn fd_pwrite(
    env: &mut WasiEnv,
    fd: Fd,
    iovs: WasmPtr<Ciovec>,
    iovs_len: u32,
    offset: Filesize,
    nwritten: WasmPtr<u32>,
) -> Errno {
    fd_write_internal(env, fd, iovs, iovs_len, Some(offset), nwritten)
}

fn fd_write_internal(
    env: &mut WasiEnv,
    fd: Fd,
    iovs: WasmPtr<Ciovec>,
    iovs_len: u32,
    offset: Option<Filesize>,
    nwritten: WasmPtr<u32>,
) -> Errno {
    let (mut memory, fs) = wasi_try_mem!(env.memory_and_fs());

    let entry = match fs.get_mut(fd) {
        Some(entry) if entry.is_file() && fd != __WASI_STDIN_FILENO => entry,
        _ => {
            let _ = nwritten.write(&mut memory, 0);
            return Errno::Badf;
        }
    };
    let stream = match fd {
        __WASI_STDOUT_FILENO => Some(ConsoleStream::Stdout),
        __WASI_STDERR_FILENO => Some(ConsoleStream::Stderr),
        _ => None,
    };
    if offset.is_some() && stream.is_some() {
        let _ = nwritten.write(&mut memory, 0);
        return Errno::Spipe;
    }

    let iovs = wasi_try_mem!(iovs.read_array(&memory, iovs_len));

    // stdout and stderr only ever grow
    let append = stream.is_some() || entry.fdflags.contains(Fdflags::APPEND);
    let mut position = match offset {
        Some(offset) => offset,
        None if append => entry.len(),
        None => entry.seek_position,
    };

    // Every buffer is fetched and the final size checked before the file is
    // touched, so a fault or Fbig leaves it as it was.
    let mut chunks = Vec::with_capacity(iovs.len());
    let mut total = 0u64;
    for iov in iovs {
        chunks.push(wasi_try_mem!(memory.read_bytes(iov.buf, iov.buf_len)));
        total += u64::from(iov.buf_len);
    }
    match position.checked_add(total) {
        Some(end) if end <= memfs_virtual_fs::MAX_FILE_LEN => {}
        _ => {
            debug!(%fd, position, total, "write would exceed the maximum file size");
            return Errno::Fbig;
        }
    }

    let file = wasi_try!(entry.file_mut(); Errno::Badf);
    let mut bytes_written = 0u32;
    let mut mirrored = Vec::new();
    for bytes in chunks {
        let written = wasi_try!(file.write_at(position, bytes));
        position += written as u64;
        bytes_written = bytes_written.saturating_add(written as u32);
        if stream.is_some() {
            mirrored.extend_from_slice(bytes);
        }
    }

    if offset.is_none() {
        entry.seek_position = position;
    }
    entry.modified = memfs_virtual_fs::now_ns();

    Span::current().record("nwritten", bytes_written);
    wasi_try_mem!(nwritten.write(&mut memory, bytes_written));

    if let Some(stream) = stream {
        env.mirror(stream, &mirrored);
    }

    Errno::Success
}
