use super::*;
use crate::syscalls::*;

/// ### `sock_send()`
/// Send a message on a socket. Not supported; there are no sockets.
/// Inputs:
/// - `Fd sock`
///     The socket on which to send data
/// - `__wasi_ciovec_t *si_data`
///     List of scatter/gather vectors to which to retrieve data
/// - `u32 si_data_len`
///     The length of the `si_data` array
/// - `SiFlags si_flags`
///     Message flags
/// Output:
/// - `u32 *so_datalen`
///     Number of bytes transmitted
#[instrument(level = "trace", skip_all, fields(%sock), ret)]
pub fn sock_send(
    _env: &mut WasiEnv,
    sock: Fd,
    _si_data: WasmPtr<Ciovec>,
    _si_data_len: u32,
    _si_flags: u16,
    _so_datalen: WasmPtr<u32>,
) -> Errno {
    Errno::Nosys
}
