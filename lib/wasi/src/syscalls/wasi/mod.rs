mod args_get;
mod args_sizes_get;
mod clock_res_get;
mod clock_time_get;
mod environ_get;
mod environ_sizes_get;
mod fd_advise;
mod fd_allocate;
mod fd_close;
mod fd_datasync;
mod fd_fdstat_get;
mod fd_fdstat_set_flags;
mod fd_fdstat_set_rights;
mod fd_filestat_get;
mod fd_filestat_set_size;
mod fd_filestat_set_times;
mod fd_prestat_dir_name;
mod fd_prestat_get;
mod fd_read;
mod fd_readdir;
mod fd_renumber;
mod fd_seek;
mod fd_sync;
mod fd_tell;
mod fd_write;
mod path_create_directory;
mod path_filestat_get;
mod path_filestat_set_times;
mod path_link;
mod path_open;
mod path_readlink;
mod path_remove_directory;
mod path_rename;
mod path_symlink;
mod path_unlink_file;
mod poll_oneoff;
mod proc_exit;
mod proc_raise;
mod random_get;
mod sched_yield;
mod sock_recv;
mod sock_send;
mod sock_shutdown;

pub use args_get::*;
pub use args_sizes_get::*;
pub use clock_res_get::*;
pub use clock_time_get::*;
pub use environ_get::*;
pub use environ_sizes_get::*;
pub use fd_advise::*;
pub use fd_allocate::*;
pub use fd_close::*;
pub use fd_datasync::*;
pub use fd_fdstat_get::*;
pub use fd_fdstat_set_flags::*;
pub use fd_fdstat_set_rights::*;
pub use fd_filestat_get::*;
pub use fd_filestat_set_size::*;
pub use fd_filestat_set_times::*;
pub use fd_prestat_dir_name::*;
pub use fd_prestat_get::*;
pub use fd_read::*;
pub use fd_readdir::*;
pub use fd_renumber::*;
pub use fd_seek::*;
pub use fd_sync::*;
pub use fd_tell::*;
pub use fd_write::*;
pub use path_create_directory::*;
pub use path_filestat_get::*;
pub use path_filestat_set_times::*;
pub use path_link::*;
pub use path_open::*;
pub use path_readlink::*;
pub use path_remove_directory::*;
pub use path_rename::*;
pub use path_symlink::*;
pub use path_unlink_file::*;
pub use poll_oneoff::*;
pub use proc_exit::*;
pub use proc_raise::*;
pub use random_get::*;
pub use sched_yield::*;
pub use sock_recv::*;
pub use sock_send::*;
pub use sock_shutdown::*;
