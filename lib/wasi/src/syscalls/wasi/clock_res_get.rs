use super::*;
use crate::syscalls::*;

/// ### `clock_res_get()`
/// Get the resolution of the specified clock
/// Input:
/// - `Clockid clock_id`
///     The ID of the clock to get the resolution of
/// Output:
/// - `Timestamp *resolution`
///     The resolution of the clock in nanoseconds
#[instrument(level = "trace", skip_all, fields(%clock_id), ret)]
pub fn clock_res_get(env: &mut WasiEnv, clock_id: u32, resolution: WasmPtr<Timestamp>) -> Errno {
    if Clockid::try_from(clock_id).is_err() {
        return Errno::Inval;
    }

    let mut memory = wasi_try_mem!(env.memory_view());
    wasi_try_mem!(resolution.write(&mut memory, CLOCK_RESOLUTION_NS));
    Errno::Success
}
