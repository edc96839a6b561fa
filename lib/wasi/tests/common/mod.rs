#![allow(dead_code)]

use memfs_wasi::{syscalls, VecMemory, WasiEnv, WasmPtr};
use memfs_wasi_types::{Ciovec, Errno, Fd, Fdflags, Iovec, Lookupflags, Oflags, Rights};

pub const PATH_AT: u32 = 0x100;
pub const OUT_AT: u32 = 0x200;
pub const IOVS_AT: u32 = 0x300;
pub const DATA_AT: u32 = 0x1000;

pub fn env() -> WasiEnv {
    WasiEnv::builder("guest")
        .memory(VecMemory::new(1))
        .mirror_stdio(false)
        .build()
        .unwrap()
}

/// Places `s` in guest memory and returns the pointer and length the guest
/// would pass.
pub fn put_str(env: &mut WasiEnv, offset: u32, s: &str) -> (WasmPtr<u8>, u32) {
    env.memory_view()
        .unwrap()
        .write_bytes(offset, s.as_bytes())
        .unwrap();
    (WasmPtr::new(offset), s.len() as u32)
}

pub fn read_u32(env: &mut WasiEnv, offset: u32) -> u32 {
    let view = env.memory_view().unwrap();
    WasmPtr::<u32>::new(offset).read(&view).unwrap()
}

pub fn read_u64(env: &mut WasiEnv, offset: u32) -> u64 {
    let view = env.memory_view().unwrap();
    WasmPtr::<u64>::new(offset).read(&view).unwrap()
}

pub fn read_mem(env: &mut WasiEnv, offset: u32, len: u32) -> Vec<u8> {
    env.memory_view()
        .unwrap()
        .read_bytes(offset, len)
        .unwrap()
        .to_vec()
}

pub fn open_at(
    env: &mut WasiEnv,
    dirfd: Fd,
    path: &str,
    oflags: Oflags,
    fdflags: Fdflags,
) -> (Errno, Fd) {
    let (ptr, len) = put_str(env, PATH_AT, path);
    let errno = syscalls::path_open(
        env,
        dirfd,
        Lookupflags::empty(),
        ptr,
        len,
        oflags,
        Rights::regular_file_base(),
        Rights::empty(),
        fdflags,
        WasmPtr::new(OUT_AT),
    );
    (errno, read_u32(env, OUT_AT))
}

pub fn open(env: &mut WasiEnv, path: &str, oflags: Oflags) -> (Errno, Fd) {
    open_at(env, 3, path, oflags, Fdflags::empty())
}

/// One `fd_read` into a single iovec of `len` bytes.
pub fn read(env: &mut WasiEnv, fd: Fd, len: u32) -> (Errno, Vec<u8>) {
    {
        let mut view = env.memory_view().unwrap();
        let iov = Iovec {
            buf: DATA_AT,
            buf_len: len,
        };
        WasmPtr::<Iovec>::new(IOVS_AT).write(&mut view, iov).unwrap();
    }
    let errno = syscalls::fd_read(env, fd, WasmPtr::new(IOVS_AT), 1, WasmPtr::new(OUT_AT));
    let nread = read_u32(env, OUT_AT);
    (errno, read_mem(env, DATA_AT, nread))
}

/// One `fd_write` of `data` through a single iovec.
pub fn write(env: &mut WasiEnv, fd: Fd, data: &[u8]) -> (Errno, u32) {
    {
        let mut view = env.memory_view().unwrap();
        view.write_bytes(DATA_AT, data).unwrap();
        let iov = Ciovec {
            buf: DATA_AT,
            buf_len: data.len() as u32,
        };
        WasmPtr::<Ciovec>::new(IOVS_AT).write(&mut view, iov).unwrap();
    }
    let errno = syscalls::fd_write(env, fd, WasmPtr::new(IOVS_AT), 1, WasmPtr::new(OUT_AT));
    (errno, read_u32(env, OUT_AT))
}
