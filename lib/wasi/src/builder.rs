//! Builder system for configuring a [`WasiEnv`] and creating it.

use std::fmt;

use memfs_virtual_fs::{path, FdTable, FsError};
use thiserror::Error;
use tracing::debug;

use crate::{
    console::{ConsoleSink, TracingConsole},
    memory::{GuestMemory, MemoryAccessor},
    WasiEnv,
};

/// Builder API for configuring a [`WasiEnv`].
///
/// Usage:
/// ```
/// # use memfs_wasi::{VecMemory, WasiEnv, WasiStateCreationError};
/// # fn main() -> Result<(), WasiStateCreationError> {
/// let env = WasiEnv::builder("csound")
///     .arg("-odac")
///     .env("SFDIR", "/sounds")
///     .map_dir("/sounds")
///     .seed_file("/sounds/patch.csd", b"<CsoundSynthesizer/>".to_vec())
///     .current_dir("/sounds")
///     .memory(VecMemory::new(1))
///     .build()?;
/// assert_eq!(env.fs().current_dir(), "/sounds");
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct WasiEnvBuilder {
    /// Command line arguments, the program name first.
    args: Vec<String>,
    /// Environment variables.
    envs: Vec<(String, Vec<u8>)>,
    /// Directories to create before the guest starts.
    dirs: Vec<String>,
    /// Files to create before the guest starts.
    files: Vec<(String, Vec<u8>)>,
    current_dir: Option<String>,
    stdin: Option<Vec<u8>>,
    console: Option<Box<dyn ConsoleSink>>,
    mirror_stdio: Option<bool>,
    memory: Option<MemoryAccessor>,
}

impl fmt::Debug for WasiEnvBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WasiEnvBuilder")
            .field("args", &self.args)
            .field("envs", &self.envs.len())
            .field("dirs", &self.dirs)
            .field("files", &self.files.iter().map(|(p, _)| p).collect::<Vec<_>>())
            .field("current_dir", &self.current_dir)
            .field("mirror_stdio", &self.mirror_stdio)
            .finish()
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum WasiStateCreationError {
    #[error("bad environment variable format: `{0}`")]
    EnvironmentVariableFormatError(String),
    #[error("argument contains null byte: `{0}`")]
    ArgumentContainsNulByte(String),
    #[error("seeded path is not allowed: `{0}`")]
    ForbiddenSeedPath(String),
    #[error("wasi filesystem setup error: `{0}`")]
    WasiFsSetupError(String),
    #[error(transparent)]
    FileSystemError(#[from] FsError),
}

impl WasiEnvBuilder {
    /// Creates an empty [`WasiEnvBuilder`].
    pub fn new(program_name: impl Into<String>) -> Self {
        WasiEnvBuilder {
            args: vec![program_name.into()],
            ..WasiEnvBuilder::default()
        }
    }

    /// Add an environment variable pair.
    ///
    /// Both the key and value of an environment variable must not
    /// contain a nul byte (`0x0`), and the key must not contain the
    /// `=` byte (`0x3d`).
    pub fn env<Key, Value>(mut self, key: Key, value: Value) -> Self
    where
        Key: AsRef<[u8]>,
        Value: AsRef<[u8]>,
    {
        self.add_env(key, value);
        self
    }

    pub fn add_env<Key, Value>(&mut self, key: Key, value: Value)
    where
        Key: AsRef<[u8]>,
        Value: AsRef<[u8]>,
    {
        self.envs.push((
            String::from_utf8_lossy(key.as_ref()).to_string(),
            value.as_ref().to_vec(),
        ));
    }

    /// Add multiple environment variable pairs.
    pub fn envs<I, Key, Value>(mut self, env_pairs: I) -> Self
    where
        I: IntoIterator<Item = (Key, Value)>,
        Key: AsRef<[u8]>,
        Value: AsRef<[u8]>,
    {
        env_pairs.into_iter().for_each(|(key, value)| {
            self.add_env(key, value);
        });

        self
    }

    /// Add an argument.
    ///
    /// Arguments must not contain the nul (0x0) byte
    pub fn arg<V>(mut self, arg: V) -> Self
    where
        V: AsRef<[u8]>,
    {
        self.add_arg(arg);
        self
    }

    pub fn add_arg<V>(&mut self, arg: V)
    where
        V: AsRef<[u8]>,
    {
        self.args
            .push(String::from_utf8_lossy(arg.as_ref()).to_string());
    }

    /// Add multiple arguments.
    pub fn args<I, Arg>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = Arg>,
        Arg: AsRef<[u8]>,
    {
        args.into_iter().for_each(|arg| {
            self.add_arg(arg);
        });

        self
    }

    /// Get a reference to the configured arguments.
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Get a reference to the configured environment variables.
    pub fn get_env(&self) -> &[(String, Vec<u8>)] {
        &self.envs
    }

    /// Create an empty directory the guest will see at `path`.
    pub fn map_dir(mut self, path: impl Into<String>) -> Self {
        self.dirs.push(path.into());
        self
    }

    /// Place a file with `contents` at `path` before the guest starts.
    pub fn seed_file(mut self, path: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        self.files.push((path.into(), contents.into()));
        self
    }

    /// The initial working directory; `/` or a directory given to
    /// [`map_dir`](Self::map_dir).
    pub fn current_dir(mut self, path: impl Into<String>) -> Self {
        self.current_dir = Some(path.into());
        self
    }

    /// What the guest reads from stdin.
    pub fn stdin(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.stdin = Some(bytes.into());
        self
    }

    /// Where copies of the guest's stdout and stderr go. Defaults to
    /// [`TracingConsole`].
    pub fn console(mut self, sink: impl ConsoleSink + 'static) -> Self {
        self.console = Some(Box::new(sink));
        self
    }

    /// Whether stdout and stderr writes are copied to the console sink at
    /// all. On by default.
    pub fn mirror_stdio(mut self, mirror: bool) -> Self {
        self.mirror_stdio = Some(mirror);
        self
    }

    /// The guest's linear memory. It can also be attached later with
    /// [`WasiEnv::set_memory`], once the module is instantiated.
    pub fn memory(mut self, memory: impl GuestMemory + 'static) -> Self {
        self.memory = Some(MemoryAccessor::new(memory));
        self
    }

    fn validate(&self) -> Result<(), WasiStateCreationError> {
        for arg in self.args.iter() {
            if arg.as_bytes().contains(&0) {
                return Err(WasiStateCreationError::ArgumentContainsNulByte(arg.clone()));
            }
        }

        for (env_key, env_value) in self.envs.iter() {
            if env_key.as_bytes().contains(&0) {
                return Err(WasiStateCreationError::EnvironmentVariableFormatError(
                    format!("found nul byte in env var key \"{}\" (key=value)", env_key),
                ));
            }
            if env_key.as_bytes().contains(&b'=') {
                return Err(WasiStateCreationError::EnvironmentVariableFormatError(
                    format!(
                        "found equal sign in env var key \"{}\" (key=value)",
                        env_key
                    ),
                ));
            }
            if env_value.contains(&0) {
                return Err(WasiStateCreationError::EnvironmentVariableFormatError(
                    format!(
                        "found nul byte in env var value \"{}\" (key=value)",
                        String::from_utf8_lossy(env_value),
                    ),
                ));
            }
        }

        for seeded in self.dirs.iter().chain(self.files.iter().map(|(p, _)| p)) {
            if path::resolve_guarded("/", seeded).is_none() || path::normalize(seeded) == "/" {
                return Err(WasiStateCreationError::ForbiddenSeedPath(seeded.clone()));
            }
        }

        Ok(())
    }

    /// Consumes the builder and produces the session.
    pub fn build(self) -> Result<WasiEnv, WasiStateCreationError> {
        self.validate()?;

        let mut fs = FdTable::new();
        if let Some(stdin) = self.stdin {
            fs.set_stdin(stdin);
        }
        for dir in self.dirs.iter() {
            if !fs.is_dir(dir) {
                fs.mkdir(dir)?;
            }
        }
        for (path, contents) in self.files {
            fs.write_file(&path, contents)?;
        }
        if let Some(cwd) = self.current_dir.as_deref() {
            fs.change_dir(cwd).map_err(|err| {
                WasiStateCreationError::WasiFsSetupError(format!(
                    "cannot use `{}` as the working directory: {}",
                    cwd, err
                ))
            })?;
        }

        debug!(args = ?self.args, cwd = %fs.current_dir(), entries = fs.len(), "built wasi env");
        Ok(WasiEnv {
            fs,
            memory: self.memory.unwrap_or_default(),
            args: self.args,
            envs: self.envs,
            console: self.console.unwrap_or_else(|| Box::new(TracingConsole)),
            mirror_stdio: self.mirror_stdio.unwrap_or(true),
            ..WasiEnv::default()
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn env_var_errors() {
        // `=` in the key is invalid.
        assert!(
            WasiEnv::builder("test_prog")
                .env("HOM=E", "/home/home")
                .build()
                .is_err(),
            "equal sign in key must be invalid"
        );

        // `\0` in the key is invalid.
        assert!(
            WasiEnv::builder("test_prog")
                .env("HOME\0", "/home/home")
                .build()
                .is_err(),
            "nul in key must be invalid"
        );

        // `\0` in the value is invalid.
        assert!(
            WasiEnv::builder("test_prog")
                .env("HOME", "/home/home\0")
                .build()
                .is_err(),
            "nul in value must be invalid"
        );

        // `=` in the value is valid.
        assert!(
            WasiEnv::builder("test_prog")
                .env("HOME", "/home/home=home")
                .build()
                .is_ok(),
            "equal sign in the value must be valid"
        );
    }

    #[test]
    fn nul_character_in_args() {
        let output = WasiEnv::builder("test_prog").arg("--h\0elp").build();
        assert!(
            matches!(output, Err(WasiStateCreationError::ArgumentContainsNulByte(_))),
            "nul byte in a single arg must be rejected"
        );
        let output = WasiEnv::builder("test_prog")
            .args(["--help", "--wat\0"])
            .build();
        assert!(
            matches!(output, Err(WasiStateCreationError::ArgumentContainsNulByte(_))),
            "nul byte in a later arg must be rejected"
        );
    }

    #[test]
    fn seeded_filesystem() {
        let env = WasiEnv::builder("prog")
            .map_dir("/sub")
            .seed_file("/sub/in.txt", b"seed".to_vec())
            .stdin(b"typed".to_vec())
            .current_dir("sub")
            .build()
            .unwrap();
        assert_eq!(env.fs().current_dir(), "/sub");
        assert_eq!(env.fs().read_file("in.txt"), Some(&b"seed"[..]));
        assert_eq!(env.fs().read_file("/dev/stdin"), Some(&b"typed"[..]));
        assert_eq!(env.args(), &["prog".to_string()]);
    }

    #[test]
    fn bad_seed_paths() {
        let err = WasiEnv::builder("prog").seed_file("/../x", b"".to_vec()).build();
        assert_eq!(
            err.unwrap_err(),
            WasiStateCreationError::ForbiddenSeedPath("/../x".to_string())
        );
        let err = WasiEnv::builder("prog").map_dir("/").build();
        assert!(matches!(err, Err(WasiStateCreationError::ForbiddenSeedPath(_))));
        let err = WasiEnv::builder("prog").current_dir("/nowhere").build();
        assert!(matches!(err, Err(WasiStateCreationError::WasiFsSetupError(_))));
    }
}
