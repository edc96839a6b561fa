use super::*;
use crate::syscalls::*;

/// ### `args_get()`
/// Read command-line argument data.
/// The sizes of the buffers should match that returned by [`args_sizes_get()`](crate::syscalls::args_sizes_get).
/// Inputs:
/// - `char **argv`
///     A pointer to a buffer to write the argument pointers.
/// - `char *argv_buf`
///     A pointer to a buffer to write the argument string data.
///
#[instrument(level = "debug", skip_all, ret)]
pub fn args_get(env: &mut WasiEnv, argv: WasmPtr<u32>, argv_buf: WasmPtr<u8>) -> Errno {
    let args = env
        .args
        .iter()
        .map(|a| a.as_bytes().to_vec())
        .collect::<Vec<_>>();
    let mut memory = wasi_try_mem!(env.memory_view());
    let result = write_buffer_array(&mut memory, &args, argv, argv_buf);

    debug!(
        "args:\n{}",
        env.args
            .iter()
            .enumerate()
            .map(|(i, v)| format!("{:>20}: {}", i, v))
            .collect::<Vec<String>>()
            .join("\n")
    );

    result
}
