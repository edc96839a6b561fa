use super::*;
use crate::syscalls::*;

/// ### `clock_time_get()`
/// Get the time of the specified clock
/// Inputs:
/// - `Clockid clock_id`
///     The ID of the clock to query
/// - `Timestamp precision`
///     The maximum amount of error the reading may have
/// Output:
/// - `Timestamp *time`
///     The value of the clock in nanoseconds
#[instrument(level = "trace", skip_all, fields(%clock_id, %precision, time = field::Empty), ret)]
pub fn clock_time_get(
    env: &mut WasiEnv,
    clock_id: u32,
    precision: Timestamp,
    time: WasmPtr<Timestamp>,
) -> Errno {
    let clock_id = wasi_try!(Clockid::try_from(clock_id).map_err(|_| Errno::Inval));
    let t_out = match clock_id {
        Clockid::Realtime => memfs_virtual_fs::now_ns(),
        Clockid::Monotonic | Clockid::ProcessCputimeId | Clockid::ThreadCputimeId => {
            env.elapsed_ns()
        }
    };
    Span::current().record("time", t_out);

    let mut memory = wasi_try_mem!(env.memory_view());
    wasi_try_mem!(time.write(&mut memory, t_out));
    Errno::Success
}
