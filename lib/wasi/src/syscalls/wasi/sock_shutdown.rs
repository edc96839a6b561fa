use super::*;
use crate::syscalls::*;

/// ### `sock_shutdown()`
/// Shut down socket send and receive channels. Not supported.
/// Inputs:
/// - `Fd sock`
///     The socket to shut down
/// - `SdFlags how`
///     Which channels on the socket to shut down
#[instrument(level = "trace", skip_all, fields(%sock, %how), ret)]
pub fn sock_shutdown(_env: &mut WasiEnv, sock: Fd, how: u8) -> Errno {
    Errno::Nosys
}
