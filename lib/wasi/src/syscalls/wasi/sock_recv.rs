use super::*;
use crate::syscalls::*;

/// ### `sock_recv()`
/// Receive a message from a socket. Not supported; there are no sockets.
/// Inputs:
/// - `Fd sock`
///     The socket on which to receive data
/// - `__wasi_iovec_t *ri_data`
///     List of scatter/gather vectors to which to store data
/// - `u32 ri_data_len`
///     The length of the `ri_data` array
/// - `RiFlags ri_flags`
///     Message flags
/// Output:
/// - `u32 *ro_datalen`
///     Number of bytes stored in `ri_data`
/// - `RoFlags *ro_flags`
///     Message flags
#[instrument(level = "trace", skip_all, fields(%sock), ret)]
pub fn sock_recv(
    _env: &mut WasiEnv,
    sock: Fd,
    _ri_data: WasmPtr<Iovec>,
    _ri_data_len: u32,
    _ri_flags: u16,
    _ro_datalen: WasmPtr<u32>,
    _ro_flags: WasmPtr<u16>,
) -> Errno {
    Errno::Nosys
}
