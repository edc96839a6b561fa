use super::*;
use crate::syscalls::*;

/// ### `sched_yield()`
/// Yields execution of the thread. There is only ever one.
#[instrument(level = "trace", skip_all, ret)]
pub fn sched_yield(_env: &mut WasiEnv) -> Errno {
    Errno::Success
}
