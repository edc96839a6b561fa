//! WASI `preview1` for guests that run without an operating system.
//!
//! The guest's files live in a [`memfs_virtual_fs::FdTable`]; the handlers
//! in [`syscalls`] read their arguments out of guest memory, act on the table
//! and write results back. A [`WasiEnv`] bundles one session's table, memory
//! and configuration, and is passed explicitly to every handler, so several
//! guests can run side by side in one host process.
//!
//! Wiring the handlers up as imports of an instantiated module is left to the
//! embedder: each handler takes the raw ABI arguments and returns the errno.
//!
//! ```
//! use memfs_wasi::{syscalls, VecMemory, WasiEnv, WasmPtr};
//! use memfs_wasi_types::{Errno, Fdflags, Lookupflags, Oflags, Rights};
//!
//! let mut env = WasiEnv::builder("guest")
//!     .memory(VecMemory::new(1))
//!     .build()
//!     .unwrap();
//! env.fs_mut().write_file("/in.txt", b"hello".to_vec()).unwrap();
//!
//! // the guest passes the path and an out-pointer for the fd
//! env.memory_view().unwrap().write_bytes(0x100, b"in.txt").unwrap();
//! let errno = syscalls::path_open(
//!     &mut env,
//!     3,
//!     Lookupflags::empty(),
//!     WasmPtr::new(0x100),
//!     6,
//!     Oflags::empty(),
//!     Rights::regular_file_base(),
//!     Rights::empty(),
//!     Fdflags::empty(),
//!     WasmPtr::new(0x200),
//! );
//! assert_eq!(errno, Errno::Success);
//! ```

#[macro_use]
mod macros;
mod builder;
mod console;
mod env;
mod memory;
pub mod syscalls;

pub use builder::{WasiEnvBuilder, WasiStateCreationError};
pub use console::{ConsoleSink, ConsoleStream, TracingConsole};
pub use env::WasiEnv;
pub use memfs_virtual_fs::{FdEntry, FdTable, FsError, Metadata};
pub use memory::{
    GuestMemory, MemoryAccessError, MemoryAccessor, MemoryView, VecMemory, WasmPtr, WASM_PAGE_SIZE,
};

use memfs_wasi_types::Errno;

/// The import module name the handlers belong to.
pub const WASI_SNAPSHOT_PREVIEW1: &str = "wasi_snapshot_preview1";

pub(crate) fn mem_error_to_wasi(err: MemoryAccessError) -> Errno {
    match err {
        MemoryAccessError::HeapOutOfBounds => Errno::Fault,
        MemoryAccessError::Overflow => Errno::Overflow,
        MemoryAccessError::NonUtf8String => Errno::Inval,
        MemoryAccessError::Unavailable => Errno::Fault,
    }
}
