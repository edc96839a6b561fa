//! An in-memory, flat-path filesystem for WASI guests.
//!
//! Every "file" is an entry in an [`FdTable`]: a small integer handle bound
//! to a canonical absolute path and a byte buffer. The guest reaches the table
//! through the syscall layer; the embedding application reaches it through the
//! host-side file API (see [`FdTable::write_file`] and friends).

use std::time::{SystemTime, UNIX_EPOCH};

use memfs_wasi_types::Errno;
use thiserror::Error;

mod fd_table;
mod file;
mod host;
pub mod path;

pub use fd_table::{
    FdEntry, FdTable, Kind, FIRST_GUEST_FD, PREOPEN_FD, STDERR_PATH, STDIN_PATH, STDOUT_PATH,
};
pub use file::{FileBuffer, MAX_FILE_LEN};
pub use host::Metadata;

pub type Result<T> = std::result::Result<T, FsError>;

/// Error type for external users
#[derive(Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum FsError {
    /// The fd given as a base was not a directory so the operation was not possible
    #[error("fd not a directory")]
    BaseNotDirectory,
    /// Expected a file but found not a file
    #[error("fd not a file")]
    NotAFile,
    /// Expected a file but found a directory
    #[error("is a directory")]
    IsADirectory,
    /// The fd given was not usable
    #[error("invalid fd")]
    InvalidFd,
    /// File exists
    #[error("file exists")]
    AlreadyExists,
    /// The provided data is invalid
    #[error("invalid input")]
    InvalidInput,
    /// The requested file or directory could not be found
    #[error("entity not found")]
    EntityNotFound,
    /// Caller was not allowed to perform this operation
    #[error("permission denied")]
    PermissionDenied,
    /// Directory not empty
    #[error("directory not empty")]
    DirectoryNotEmpty,
    /// The path escapes the root or names a reserved host entry
    #[error("forbidden path")]
    ForbiddenPath,
    /// The file would grow past [`MAX_FILE_LEN`]
    #[error("file too large")]
    FileTooLarge,
    /// The operation is not supported on this entry
    #[error("unsupported")]
    Unsupported,
    /// The entry is in use as the working directory
    #[error("resource busy")]
    ResourceBusy,
}

impl From<FsError> for Errno {
    fn from(fs_error: FsError) -> Self {
        match fs_error {
            FsError::BaseNotDirectory => Errno::Notdir,
            FsError::NotAFile => Errno::Inval,
            FsError::IsADirectory => Errno::Isdir,
            FsError::InvalidFd => Errno::Badf,
            FsError::AlreadyExists => Errno::Exist,
            FsError::InvalidInput => Errno::Inval,
            FsError::EntityNotFound => Errno::Noent,
            FsError::PermissionDenied => Errno::Perm,
            FsError::DirectoryNotEmpty => Errno::Notempty,
            FsError::ForbiddenPath => Errno::Badf,
            FsError::FileTooLarge => Errno::Fbig,
            FsError::Unsupported => Errno::Notsup,
            FsError::ResourceBusy => Errno::Busy,
        }
    }
}

/// Wall-clock time in nanoseconds since the Unix epoch.
pub fn now_ns() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(0)
}
