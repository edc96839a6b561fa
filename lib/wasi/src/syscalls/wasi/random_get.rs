use super::*;
use crate::syscalls::*;

/// ### `random_get()`
/// Fill buffer with high-quality random data.  This function may be slow and block
/// Inputs:
/// - `void *buf`
///     A pointer to a buffer where the random bytes will be written
/// - `size_t buf_len`
///     The number of bytes that will be written
#[instrument(level = "trace", skip_all, fields(%buf_len), ret)]
pub fn random_get(env: &mut WasiEnv, buf: WasmPtr<u8>, buf_len: u32) -> Errno {
    let mut memory = wasi_try_mem!(env.memory_view());
    let buf = wasi_try_mem!(memory.slice_mut(buf.offset(), buf_len));
    match getrandom::getrandom(buf) {
        Ok(()) => Errno::Success,
        Err(err) => {
            warn!(%err, "random source unavailable");
            Errno::Io
        }
    }
}
