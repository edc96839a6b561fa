//! Macros to simplify some common WASI-specific tasks.

/// Like the `try!` macro or `?` syntax: returns the value if the computation
/// succeeded or returns the error value.
macro_rules! wasi_try {
    ($expr:expr) => {{
        match $expr {
            Ok(val) => val,
            Err(err) => {
                let errno: memfs_wasi_types::Errno = ::std::convert::From::from(err);
                return errno;
            }
        }
    }};
    ($expr:expr; $e:expr) => {{
        let opt: Option<_> = $expr;
        wasi_try!(opt.ok_or($e))
    }};
}

/// Like `wasi_try` but converts a `MemoryAccessError` to a
/// `memfs_wasi_types::Errno`.
macro_rules! wasi_try_mem {
    ($expr:expr) => {{
        wasi_try!($expr.map_err($crate::mem_error_to_wasi))
    }};
}
