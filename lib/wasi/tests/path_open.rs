mod common;

use common::*;
use memfs_wasi::syscalls;
use memfs_wasi_types::{Errno, Fdflags, Lookupflags, Oflags, Rights};
use pretty_assertions::assert_eq;

#[test]
fn opens_existing_file() {
    let mut env = env();
    let expected = env.fs_mut().write_file("/data.txt", b"abc".to_vec()).unwrap();

    let (errno, fd) = open(&mut env, "data.txt", Oflags::empty());
    assert_eq!(errno, Errno::Success);
    assert_eq!(fd, expected);
    assert!(fd >= 4);
}

#[test]
fn missing_without_create_writes_sentinel() {
    let mut env = env();
    let (errno, fd) = open(&mut env, "missing.txt", Oflags::empty());
    assert_eq!(errno, Errno::Noent);
    assert_eq!(fd, 0xffff_ffff);
    assert!(!env.fs().exists("/missing.txt"));
}

#[test]
fn create_makes_an_empty_file() {
    let mut env = env();
    let (errno, fd) = open(&mut env, "new.txt", Oflags::CREATE);
    assert_eq!(errno, Errno::Success);
    assert_eq!(fd, 4);
    assert_eq!(env.fs().read_file("/new.txt"), Some(&b""[..]));
}

#[test]
fn directory_without_flag_is_isdir() {
    let mut env = env();
    env.fs_mut().mkdir("/sub").unwrap();
    let (errno, _) = open(&mut env, "sub", Oflags::empty());
    assert_eq!(errno, Errno::Isdir);

    let (errno, fd) = open(&mut env, "sub", Oflags::DIRECTORY);
    assert_eq!(errno, Errno::Success);
    assert_eq!(env.fs().get(fd).unwrap().path, "/sub");
}

#[test]
fn missing_directory_is_never_created() {
    let mut env = env();
    let (errno, _) = open(&mut env, "nodir", Oflags::DIRECTORY | Oflags::CREATE);
    assert_eq!(errno, Errno::Noent);
    assert!(!env.fs().exists("/nodir"));
}

#[test]
fn escaping_the_root_is_refused() {
    let mut env = env();
    let (errno, _) = open(&mut env, "../etc/passwd", Oflags::CREATE);
    assert_eq!(errno, Errno::Badf);
    let (errno, _) = open(&mut env, ".AppleDouble/x", Oflags::CREATE);
    assert_eq!(errno, Errno::Badf);
    assert_eq!(env.fs().len(), 4);
}

#[test]
fn relative_to_another_directory_fd() {
    let mut env = env();
    let dir = env.fs_mut().mkdir("/a").unwrap();
    let (errno, fd) = open_at(&mut env, dir, "b.txt", Oflags::CREATE, Fdflags::empty());
    assert_eq!(errno, Errno::Success);
    assert_eq!(env.fs().get(fd).unwrap().path, "/a/b.txt");

    let (errno, _) = open_at(&mut env, fd, "c.txt", Oflags::CREATE, Fdflags::empty());
    assert_eq!(errno, Errno::Notdir);
    let (errno, _) = open_at(&mut env, 99, "c.txt", Oflags::CREATE, Fdflags::empty());
    assert_eq!(errno, Errno::Badf);
}

#[test]
fn working_directory_applies_to_preopen() {
    let mut env = env();
    env.fs_mut().mkdir("/sub").unwrap();
    env.fs_mut().change_dir("/sub").unwrap();

    let (errno, fd) = open(&mut env, "file.txt", Oflags::CREATE);
    assert_eq!(errno, Errno::Success);
    assert_eq!(env.fs().get(fd).unwrap().path, "/sub/file.txt");
}

#[test]
fn append_flag_sends_writes_to_the_end() {
    let mut env = env();
    env.fs_mut().write_file("/log", b"one\n".to_vec()).unwrap();
    let (errno, fd) = open_at(&mut env, 3, "log", Oflags::empty(), Fdflags::APPEND);
    assert_eq!(errno, Errno::Success);

    assert_eq!(write(&mut env, fd, b"two\n"), (Errno::Success, 4));
    assert_eq!(env.fs().read_file("/log"), Some(&b"one\ntwo\n"[..]));
}

#[test]
fn non_utf8_path_is_inval() {
    let mut env = env();
    env.memory_view()
        .unwrap()
        .write_bytes(PATH_AT, &[0xff, 0xfe])
        .unwrap();
    let errno = syscalls::path_open(
        &mut env,
        3,
        Lookupflags::empty(),
        memfs_wasi::WasmPtr::new(PATH_AT),
        2,
        Oflags::CREATE,
        Rights::empty(),
        Rights::empty(),
        Fdflags::empty(),
        memfs_wasi::WasmPtr::new(OUT_AT),
    );
    assert_eq!(errno, Errno::Inval);
}
