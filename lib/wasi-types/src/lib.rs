//! WASI `preview1` types used by the in-memory WASI filesystem.
//!
//! Everything the guest sees travels through the fixed little-endian
//! layouts declared here; [`ValueType`] is the single place where those
//! layouts are packed into and unpacked from guest memory.

mod error;
mod file;
mod io;
mod time;
mod value;

pub use error::*;
pub use file::*;
pub use io::*;
pub use time::*;
pub use value::*;

/// A file descriptor handle.
pub type Fd = u32;
/// Non-negative file size or length of a region within a file.
pub type Filesize = u64;
/// Relative offset within a file.
pub type FileDelta = i64;
/// File serial number that is unique within its file system.
pub type Inode = u64;
/// Identifier for a device containing a file system.
pub type Device = u64;
/// Number of hard links to an inode.
pub type Linkcount = u64;
/// Exit code generated by a process when exiting.
pub type ExitCode = u32;

pub const __WASI_STDIN_FILENO: Fd = 0;
pub const __WASI_STDOUT_FILENO: Fd = 1;
pub const __WASI_STDERR_FILENO: Fd = 2;
