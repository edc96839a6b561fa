use super::*;
use crate::syscalls::*;

/// ### `proc_exit()`
/// Terminate the process normally. An exit code of 0 indicates successful
/// termination of the program. The meanings of other values is dependent on
/// the environment.
///
/// The code is recorded on the [`WasiEnv`]; unwinding the guest is up to
/// the embedder.
/// Inputs:
/// - `ExitCode`
///   Exit code to return to the operating system
#[instrument(level = "debug", skip_all, fields(%code))]
pub fn proc_exit(env: &mut WasiEnv, code: ExitCode) {
    debug!("wasi::proc_exit (code = {})", code);
    env.exit_code = Some(code);
}
