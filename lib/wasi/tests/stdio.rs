mod common;

use std::sync::{Arc, Mutex};

use common::*;
use memfs_wasi::{syscalls, ConsoleStream, VecMemory, WasiEnv, WasmPtr};
use memfs_wasi_types::Errno;
use pretty_assertions::assert_eq;

type Captured = Arc<Mutex<Vec<(ConsoleStream, Vec<u8>)>>>;

fn capturing_env() -> (WasiEnv, Captured) {
    let captured: Captured = Arc::default();
    let sink = captured.clone();
    let env = WasiEnv::builder("guest")
        .memory(VecMemory::new(1))
        .stdin(b"line one\nline two\n".to_vec())
        .console(move |stream: ConsoleStream, bytes: &[u8]| {
            sink.lock().unwrap().push((stream, bytes.to_vec()));
        })
        .build()
        .unwrap();
    (env, captured)
}

#[test]
fn stdout_is_kept_and_mirrored() {
    let (mut env, captured) = capturing_env();

    assert_eq!(write(&mut env, 1, b"hello "), (Errno::Success, 6));
    assert_eq!(write(&mut env, 1, b"world\n"), (Errno::Success, 6));
    assert_eq!(write(&mut env, 2, b"oops\n"), (Errno::Success, 5));

    assert_eq!(env.fs().read_stdout(), b"hello world\n");
    assert_eq!(env.fs().read_stderr(), b"oops\n");
    assert_eq!(
        *captured.lock().unwrap(),
        vec![
            (ConsoleStream::Stdout, b"hello ".to_vec()),
            (ConsoleStream::Stdout, b"world\n".to_vec()),
            (ConsoleStream::Stderr, b"oops\n".to_vec()),
        ]
    );
}

#[test]
fn mirroring_can_be_switched_off() {
    let captured: Captured = Arc::default();
    let sink = captured.clone();
    let mut env = WasiEnv::builder("guest")
        .memory(VecMemory::new(1))
        .console(move |stream: ConsoleStream, bytes: &[u8]| {
            sink.lock().unwrap().push((stream, bytes.to_vec()));
        })
        .mirror_stdio(false)
        .build()
        .unwrap();

    assert_eq!(write(&mut env, 1, b"quiet").0, Errno::Success);
    assert_eq!(env.fs().read_stdout(), b"quiet");
    assert!(captured.lock().unwrap().is_empty());
}

#[test]
fn stdin_reads_sequentially() {
    let (mut env, _) = capturing_env();
    assert_eq!(read(&mut env, 0, 9), (Errno::Success, b"line one\n".to_vec()));
    assert_eq!(read(&mut env, 0, 64), (Errno::Success, b"line two\n".to_vec()));
    assert_eq!(read(&mut env, 0, 64), (Errno::Success, Vec::new()));
}

#[test]
fn stdio_is_not_seekable() {
    let (mut env, _) = capturing_env();
    let errno = syscalls::fd_tell(&mut env, 1, WasmPtr::new(OUT_AT));
    assert_eq!(errno, Errno::Spipe);
    let errno = syscalls::fd_pwrite(&mut env, 1, WasmPtr::new(IOVS_AT), 0, 0, WasmPtr::new(OUT_AT));
    assert_eq!(errno, Errno::Spipe);
    let errno = syscalls::fd_pread(&mut env, 0, WasmPtr::new(IOVS_AT), 0, 0, WasmPtr::new(OUT_AT));
    assert_eq!(errno, Errno::Spipe);
}

#[test]
fn stdio_cannot_be_unlinked() {
    let (mut env, _) = capturing_env();
    let (ptr, len) = put_str(&mut env, PATH_AT, "/dev/stdout");
    assert_eq!(syscalls::path_unlink_file(&mut env, 3, ptr, len), Errno::Perm);
    assert!(env.fs().get(1).is_some());
}

#[test]
fn reset_discards_guest_files() {
    let (mut env, _) = capturing_env();
    let (_, fd) = open(&mut env, "tmp", memfs_wasi_types::Oflags::CREATE);
    assert_eq!(write(&mut env, 1, b"out").0, Errno::Success);
    syscalls::proc_exit(&mut env, 3);
    assert_eq!(env.exit_code(), Some(3));

    env.reset();
    assert!(env.fs().get(fd).is_none());
    assert_eq!(env.fs().read_stdout(), b"");
    assert_eq!(env.fs().read_file("/dev/stdin"), Some(&b"line one\nline two\n"[..]));
    assert_eq!(env.exit_code(), None);
    assert_eq!(env.fs().current_dir(), "/");
}
