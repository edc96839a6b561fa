use super::*;
use crate::syscalls::*;

/// ### `args_sizes_get()`
/// Return command-line argument data sizes.
/// Outputs:
/// - `size_t *argc`
///     The number of arguments.
/// - `size_t *argv_buf_size`
///     The size of the argument string data.
#[instrument(level = "debug", skip_all, ret)]
pub fn args_sizes_get(
    env: &mut WasiEnv,
    argc: WasmPtr<u32>,
    argv_buf_size: WasmPtr<u32>,
) -> Errno {
    let args = env
        .args
        .iter()
        .map(|a| a.as_bytes().to_vec())
        .collect::<Vec<_>>();
    let (argc_val, argv_buf_size_val) = buffer_array_sizes(&args);

    let mut memory = wasi_try_mem!(env.memory_view());
    wasi_try_mem!(argc.write(&mut memory, argc_val));
    wasi_try_mem!(argv_buf_size.write(&mut memory, argv_buf_size_val));

    debug!("argc={}, argv_buf_size={}", argc_val, argv_buf_size_val);

    Errno::Success
}
