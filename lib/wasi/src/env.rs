use std::{fmt, time::Instant};

use memfs_virtual_fs::FdTable;
use memfs_wasi_types::ExitCode;
use tracing::debug;

use crate::{
    console::{ConsoleSink, ConsoleStream, TracingConsole},
    memory::{GuestMemory, MemoryAccessError, MemoryAccessor, MemoryView},
    WasiEnvBuilder,
};

/// The state of one guest session: its filesystem, its memory and its
/// configuration. Every syscall handler receives it explicitly.
pub struct WasiEnv {
    pub(crate) fs: FdTable,
    pub(crate) memory: MemoryAccessor,
    pub(crate) args: Vec<String>,
    pub(crate) envs: Vec<(String, Vec<u8>)>,
    pub(crate) started: Instant,
    pub(crate) exit_code: Option<ExitCode>,
    pub(crate) console: Box<dyn ConsoleSink>,
    pub(crate) mirror_stdio: bool,
}

impl fmt::Debug for WasiEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WasiEnv")
            .field("fs", &self.fs)
            .field("memory", &self.memory)
            .field("args", &self.args)
            .field("envs", &self.envs.len())
            .field("exit_code", &self.exit_code)
            .field("mirror_stdio", &self.mirror_stdio)
            .finish()
    }
}

impl Default for WasiEnv {
    fn default() -> Self {
        Self {
            fs: FdTable::new(),
            memory: MemoryAccessor::default(),
            args: Vec::new(),
            envs: Vec::new(),
            started: Instant::now(),
            exit_code: None,
            console: Box::new(TracingConsole),
            mirror_stdio: true,
        }
    }
}

impl WasiEnv {
    /// Start configuring a new session.
    pub fn builder(program_name: impl Into<String>) -> WasiEnvBuilder {
        WasiEnvBuilder::new(program_name)
    }

    pub fn fs(&self) -> &FdTable {
        &self.fs
    }

    pub fn fs_mut(&mut self) -> &mut FdTable {
        &mut self.fs
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn envs(&self) -> &[(String, Vec<u8>)] {
        &self.envs
    }

    /// The code the guest passed to `proc_exit`, if it has exited.
    pub fn exit_code(&self) -> Option<ExitCode> {
        self.exit_code
    }

    /// Attaches the guest's linear memory, replacing any previous one.
    pub fn set_memory(&mut self, memory: impl GuestMemory + 'static) {
        self.memory.attach(memory);
    }

    pub fn memory(&self) -> &MemoryAccessor {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut MemoryAccessor {
        &mut self.memory
    }

    /// To be called from the embedder's memory-grow hook: the backing buffer
    /// may have moved, so the cached view is dropped.
    pub fn memory_grown(&mut self) {
        debug!("guest memory grown, invalidating view");
        self.memory.invalidate();
    }

    pub fn memory_view(&mut self) -> Result<MemoryView<'_>, MemoryAccessError> {
        self.memory.view()
    }

    /// Borrows the memory view and the filesystem at the same time.
    pub fn memory_and_fs(&mut self) -> Result<(MemoryView<'_>, &mut FdTable), MemoryAccessError> {
        let view = self.memory.view()?;
        Ok((view, &mut self.fs))
    }

    /// Hands bytes the guest wrote to stdout or stderr to the console sink.
    pub(crate) fn mirror(&mut self, stream: ConsoleStream, bytes: &[u8]) {
        if self.mirror_stdio && !bytes.is_empty() {
            self.console.write(stream, bytes);
        }
    }

    /// Tears the session down: every non-reserved entry is discarded, the
    /// working directory returns to `/` and the exit code is forgotten.
    pub fn reset(&mut self) {
        debug!(entries = self.fs.len(), "resetting session");
        self.fs.clear();
        self.exit_code = None;
        self.started = Instant::now();
        self.memory.invalidate();
    }

    /// Nanoseconds since the session started.
    pub(crate) fn elapsed_ns(&self) -> u64 {
        self.started.elapsed().as_nanos() as u64
    }
}
