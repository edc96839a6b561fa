use super::*;
use crate::syscalls::*;

/// ### `poll_oneoff()`
/// Concurrently poll for a set of events. Not supported; the guest runs
/// without an event loop.
/// Inputs:
/// - `const __wasi_subscription_t *in`
///     The events to subscribe to
/// - `__wasi_event_t *out`
///     The events that have occured
/// - `u32 nsubscriptions`
///     The number of subscriptions and the number of events
/// Output:
/// - `u32 nevents`
///     The number of events seen
#[instrument(level = "trace", skip_all, fields(%nsubscriptions), ret)]
pub fn poll_oneoff(
    _env: &mut WasiEnv,
    _in_: WasmPtr<u8>,
    _out_: WasmPtr<u8>,
    nsubscriptions: u32,
    _nevents: WasmPtr<u32>,
) -> Errno {
    Errno::Nosys
}
