use std::fmt;

use tracing::info;

/// Which standard stream a guest write went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsoleStream {
    Stdout,
    Stderr,
}

impl fmt::Display for ConsoleStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleStream::Stdout => write!(f, "stdout"),
            ConsoleStream::Stderr => write!(f, "stderr"),
        }
    }
}

/// Receives a copy of everything the guest writes to stdout and stderr.
///
/// The bytes are also kept in the filesystem, so a sink only observes; it
/// cannot lose output.
pub trait ConsoleSink: Send {
    fn write(&mut self, stream: ConsoleStream, bytes: &[u8]);
}

/// Emits each guest write as an `info` event on the `memfs_wasi::console`
/// target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingConsole;

impl ConsoleSink for TracingConsole {
    fn write(&mut self, stream: ConsoleStream, bytes: &[u8]) {
        let text = String::from_utf8_lossy(bytes);
        info!(
            target: "memfs_wasi::console",
            %stream,
            "{}",
            text.trim_end_matches('\n')
        );
    }
}

impl<F> ConsoleSink for F
where
    F: FnMut(ConsoleStream, &[u8]) + Send,
{
    fn write(&mut self, stream: ConsoleStream, bytes: &[u8]) {
        self(stream, bytes)
    }
}
