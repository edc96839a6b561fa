use super::*;
use crate::syscalls::*;

/// ### `environ_sizes_get()`
/// Return command-line argument data sizes.
/// Outputs:
/// - `size_t *environ_count`
///     The number of environment variables.
/// - `size_t *environ_buf_size`
///     The size of the environment variable string data.
#[instrument(level = "trace", skip_all, ret)]
pub fn environ_sizes_get(
    env: &mut WasiEnv,
    environ_count: WasmPtr<u32>,
    environ_buf_size: WasmPtr<u32>,
) -> Errno {
    let envs = environ_entries(&env.envs);
    let (env_var_count, env_buf_size) = buffer_array_sizes(&envs);

    let mut memory = wasi_try_mem!(env.memory_view());
    wasi_try_mem!(environ_count.write(&mut memory, env_var_count));
    wasi_try_mem!(environ_buf_size.write(&mut memory, env_buf_size));

    trace!(
        %env_var_count,
        %env_buf_size
    );

    Errno::Success
}
