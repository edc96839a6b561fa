use num_enum::{IntoPrimitive, TryFromPrimitive};
#[cfg(feature = "enable-serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes returned by functions.
///
/// The discriminants are the fixed `preview1` numbering; a handler returns
/// one of these to the guest as its `u16` status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "enable-serde", derive(Serialize, Deserialize))]
#[repr(u16)]
pub enum Errno {
    #[error("no error occurred, system call completed successfully")]
    Success = 0,
    #[error("argument list too long")]
    Toobig,
    #[error("permission denied")]
    Access,
    #[error("address in use")]
    Addrinuse,
    #[error("address not available")]
    Addrnotavail,
    #[error("address family not supported")]
    Afnosupport,
    #[error("resource unavailable, or operation would block")]
    Again,
    #[error("connection already in progress")]
    Already,
    #[error("bad file descriptor")]
    Badf,
    #[error("bad message")]
    Badmsg,
    #[error("device or resource busy")]
    Busy,
    #[error("operation canceled")]
    Canceled,
    #[error("no child processes")]
    Child,
    #[error("connection aborted")]
    Connaborted,
    #[error("connection refused")]
    Connrefused,
    #[error("connection reset")]
    Connreset,
    #[error("resource deadlock would occur")]
    Deadlk,
    #[error("destination address required")]
    Destaddrreq,
    #[error("mathematics argument out of domain of function")]
    Dom,
    #[error("reserved")]
    Dquot,
    #[error("file exists")]
    Exist,
    #[error("bad address")]
    Fault,
    #[error("file too large")]
    Fbig,
    #[error("host is unreachable")]
    Hostunreach,
    #[error("identifier removed")]
    Idrm,
    #[error("illegal byte sequence")]
    Ilseq,
    #[error("operation in progress")]
    Inprogress,
    #[error("interrupted function")]
    Intr,
    #[error("invalid argument")]
    Inval,
    #[error("I/O error")]
    Io,
    #[error("socket is connected")]
    Isconn,
    #[error("is a directory")]
    Isdir,
    #[error("too many levels of symbolic links")]
    Loop,
    #[error("file descriptor value too large")]
    Mfile,
    #[error("too many links")]
    Mlink,
    #[error("message too large")]
    Msgsize,
    #[error("reserved")]
    Multihop,
    #[error("filename too long")]
    Nametoolong,
    #[error("network is down")]
    Netdown,
    #[error("connection aborted by network")]
    Netreset,
    #[error("network unreachable")]
    Netunreach,
    #[error("too many files open in system")]
    Nfile,
    #[error("no buffer space available")]
    Nobufs,
    #[error("no such device")]
    Nodev,
    #[error("no such file or directory")]
    Noent,
    #[error("executable file format error")]
    Noexec,
    #[error("no locks available")]
    Nolck,
    #[error("reserved")]
    Nolink,
    #[error("not enough space")]
    Nomem,
    #[error("no message of the desired type")]
    Nomsg,
    #[error("protocol not available")]
    Noprotoopt,
    #[error("no space left on device")]
    Nospc,
    #[error("function not supported")]
    Nosys,
    #[error("the socket is not connected")]
    Notconn,
    #[error("not a directory or a symbolic link to a directory")]
    Notdir,
    #[error("directory not empty")]
    Notempty,
    #[error("state not recoverable")]
    Notrecoverable,
    #[error("not a socket")]
    Notsock,
    #[error("not supported, or operation not supported on socket")]
    Notsup,
    #[error("inappropriate I/O control operation")]
    Notty,
    #[error("no such device or address")]
    Nxio,
    #[error("value too large to be stored in data type")]
    Overflow,
    #[error("previous owner died")]
    Ownerdead,
    #[error("operation not permitted")]
    Perm,
    #[error("broken pipe")]
    Pipe,
    #[error("protocol error")]
    Proto,
    #[error("protocol not supported")]
    Protonosupport,
    #[error("protocol wrong type for socket")]
    Prototype,
    #[error("result too large")]
    Range,
    #[error("read-only file system")]
    Rofs,
    #[error("invalid seek")]
    Spipe,
    #[error("no such process")]
    Srch,
    #[error("reserved")]
    Stale,
    #[error("connection timed out")]
    Timedout,
    #[error("text file busy")]
    Txtbsy,
    #[error("cross-device link")]
    Xdev,
    #[error("capabilities insufficient")]
    Notcapable,
}

impl Errno {
    /// The raw value handed back across the ABI.
    pub fn raw(self) -> u16 {
        self.into()
    }

    pub fn is_success(self) -> bool {
        self == Errno::Success
    }
}
