use super::*;
use crate::syscalls::*;

/// ### `proc_raise()`
/// Send a signal to the process of the calling thread. Signals are
/// accepted and ignored.
/// Inputs:
/// - `Signal`
///   Signal to be raised for this process
#[instrument(level = "trace", skip_all, fields(%sig), ret)]
pub fn proc_raise(_env: &mut WasiEnv, sig: u8) -> Errno {
    Errno::Success
}
