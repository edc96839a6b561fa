use super::*;
use crate::syscalls::*;

/// ### `environ_get()`
/// Read environment variable data.
/// The sizes of the buffers should match that returned by [`environ_sizes_get()`](crate::syscalls::environ_sizes_get).
/// Inputs:
/// - `char **environ`
///     A pointer to a buffer to write the environment variable pointers.
/// - `char *environ_buf`
///     A pointer to a buffer to write the environment variable string data.
#[instrument(level = "trace", skip_all, ret)]
pub fn environ_get(env: &mut WasiEnv, environ: WasmPtr<u32>, environ_buf: WasmPtr<u8>) -> Errno {
    let envs = environ_entries(&env.envs);
    let mut memory = wasi_try_mem!(env.memory_view());
    write_buffer_array(&mut memory, &envs, environ, environ_buf)
}
