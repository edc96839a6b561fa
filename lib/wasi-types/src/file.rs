use crate::{Device, Filesize, Inode, Linkcount, Timestamp, ValueType};
use bitflags::bitflags;
use byteorder::{ByteOrder, LittleEndian};
use num_enum::{IntoPrimitive, TryFromPrimitive};
#[cfg(feature = "enable-serde")]
use serde::{Deserialize, Serialize};

/// The type of a file descriptor or file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "enable-serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Filetype {
    Unknown = 0,
    BlockDevice,
    CharacterDevice,
    Directory,
    RegularFile,
    SocketDgram,
    SocketStream,
    SymbolicLink,
}

/// The position relative to which to set the offset of the file descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "enable-serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Whence {
    /// Seek relative to start-of-file.
    Set = 0,
    /// Seek relative to current position.
    Cur,
    /// Seek relative to end-of-file.
    End,
}

/// File or memory access pattern advisory information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum Advice {
    Normal = 0,
    Sequential,
    Random,
    Willneed,
    Dontneed,
    Noreuse,
}

/// Identifiers for preopened capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum Preopentype {
    /// A pre-opened directory.
    Dir = 0,
}

bitflags! {
    /// File descriptor rights, determining which actions may be performed.
    pub struct Rights: u64 {
        const FD_DATASYNC = 1 << 0;
        const FD_READ = 1 << 1;
        const FD_SEEK = 1 << 2;
        const FD_FDSTAT_SET_FLAGS = 1 << 3;
        const FD_SYNC = 1 << 4;
        const FD_TELL = 1 << 5;
        const FD_WRITE = 1 << 6;
        const FD_ADVISE = 1 << 7;
        const FD_ALLOCATE = 1 << 8;
        const PATH_CREATE_DIRECTORY = 1 << 9;
        const PATH_CREATE_FILE = 1 << 10;
        const PATH_LINK_SOURCE = 1 << 11;
        const PATH_LINK_TARGET = 1 << 12;
        const PATH_OPEN = 1 << 13;
        const FD_READDIR = 1 << 14;
        const PATH_READLINK = 1 << 15;
        const PATH_RENAME_SOURCE = 1 << 16;
        const PATH_RENAME_TARGET = 1 << 17;
        const PATH_FILESTAT_GET = 1 << 18;
        const PATH_FILESTAT_SET_SIZE = 1 << 19;
        const PATH_FILESTAT_SET_TIMES = 1 << 20;
        const FD_FILESTAT_GET = 1 << 21;
        const FD_FILESTAT_SET_SIZE = 1 << 22;
        const FD_FILESTAT_SET_TIMES = 1 << 23;
        const PATH_SYMLINK = 1 << 24;
        const PATH_REMOVE_DIRECTORY = 1 << 25;
        const PATH_UNLINK_FILE = 1 << 26;
        const POLL_FD_READWRITE = 1 << 27;
        const SOCK_SHUTDOWN = 1 << 28;
    }
}

impl Rights {
    /// Rights granted on every regular file.
    pub fn regular_file_base() -> Rights {
        Rights::FD_DATASYNC
            | Rights::FD_READ
            | Rights::FD_SEEK
            | Rights::FD_FDSTAT_SET_FLAGS
            | Rights::FD_SYNC
            | Rights::FD_TELL
            | Rights::FD_WRITE
            | Rights::FD_ADVISE
            | Rights::FD_ALLOCATE
            | Rights::FD_FILESTAT_GET
            | Rights::FD_FILESTAT_SET_SIZE
            | Rights::FD_FILESTAT_SET_TIMES
            | Rights::POLL_FD_READWRITE
    }

    /// A regular file hands nothing down.
    pub fn regular_file_inheriting() -> Rights {
        Rights::empty()
    }

    /// Rights granted on every directory, the preopen included.
    pub fn directory_base() -> Rights {
        Rights::FD_FDSTAT_SET_FLAGS
            | Rights::FD_SYNC
            | Rights::FD_ADVISE
            | Rights::PATH_CREATE_DIRECTORY
            | Rights::PATH_CREATE_FILE
            | Rights::PATH_LINK_SOURCE
            | Rights::PATH_LINK_TARGET
            | Rights::PATH_OPEN
            | Rights::FD_READDIR
            | Rights::PATH_READLINK
            | Rights::PATH_RENAME_SOURCE
            | Rights::PATH_RENAME_TARGET
            | Rights::PATH_FILESTAT_GET
            | Rights::PATH_FILESTAT_SET_SIZE
            | Rights::PATH_FILESTAT_SET_TIMES
            | Rights::FD_FILESTAT_GET
            | Rights::FD_FILESTAT_SET_TIMES
            | Rights::PATH_SYMLINK
            | Rights::PATH_REMOVE_DIRECTORY
            | Rights::PATH_UNLINK_FILE
            | Rights::POLL_FD_READWRITE
    }

    /// Files opened beneath a directory may receive any of these.
    pub fn directory_inheriting() -> Rights {
        Rights::directory_base() | Rights::regular_file_base()
    }
}

bitflags! {
    /// Open flags used by `path_open`.
    pub struct Oflags: u16 {
        /// Create file if it does not exist.
        const CREATE = 1 << 0;
        /// Fail if not a directory.
        const DIRECTORY = 1 << 1;
        /// Fail if file already exists.
        const EXCL = 1 << 2;
        /// Truncate file to size 0.
        const TRUNC = 1 << 3;
    }
}

bitflags! {
    /// File descriptor flags.
    pub struct Fdflags: u16 {
        /// Append mode: data written to the file is always appended to the
        /// file's end.
        const APPEND = 1 << 0;
        const DSYNC = 1 << 1;
        const NONBLOCK = 1 << 2;
        const RSYNC = 1 << 3;
        const SYNC = 1 << 4;
    }
}

bitflags! {
    /// Flags determining the method of how paths are resolved.
    pub struct Lookupflags: u32 {
        /// As long as the resolved path corresponds to a symbolic link, it is
        /// expanded.
        const SYMLINK_FOLLOW = 1 << 0;
    }
}

bitflags! {
    /// Which file time attributes to adjust.
    pub struct Fstflags: u16 {
        const SET_ATIM = 1 << 0;
        const SET_ATIM_NOW = 1 << 1;
        const SET_MTIM = 1 << 2;
        const SET_MTIM_NOW = 1 << 3;
    }
}

/// File descriptor attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fdstat {
    pub fs_filetype: Filetype,
    pub fs_flags: Fdflags,
    pub fs_rights_base: Rights,
    pub fs_rights_inheriting: Rights,
}

impl ValueType for Fdstat {
    const SIZE: usize = 24;

    fn write_to(&self, bytes: &mut [u8]) {
        bytes.fill(0);
        bytes[0] = self.fs_filetype.into();
        LittleEndian::write_u16(&mut bytes[2..4], self.fs_flags.bits());
        LittleEndian::write_u64(&mut bytes[8..16], self.fs_rights_base.bits());
        LittleEndian::write_u64(&mut bytes[16..24], self.fs_rights_inheriting.bits());
    }

    fn read_from(bytes: &[u8]) -> Self {
        Self {
            fs_filetype: Filetype::try_from(bytes[0]).unwrap_or(Filetype::Unknown),
            fs_flags: Fdflags::from_bits_truncate(LittleEndian::read_u16(&bytes[2..4])),
            fs_rights_base: Rights::from_bits_truncate(LittleEndian::read_u64(&bytes[8..16])),
            fs_rights_inheriting: Rights::from_bits_truncate(LittleEndian::read_u64(
                &bytes[16..24],
            )),
        }
    }
}

/// File attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Filestat {
    pub st_dev: Device,
    pub st_ino: Inode,
    pub st_filetype: Filetype,
    pub st_nlink: Linkcount,
    pub st_size: Filesize,
    pub st_atim: Timestamp,
    pub st_mtim: Timestamp,
    pub st_ctim: Timestamp,
}

impl Default for Filestat {
    fn default() -> Self {
        Self {
            st_dev: 0,
            st_ino: 0,
            st_filetype: Filetype::Unknown,
            st_nlink: 1,
            st_size: 0,
            st_atim: 0,
            st_mtim: 0,
            st_ctim: 0,
        }
    }
}

impl ValueType for Filestat {
    const SIZE: usize = 64;

    fn write_to(&self, bytes: &mut [u8]) {
        bytes.fill(0);
        LittleEndian::write_u64(&mut bytes[0..8], self.st_dev);
        LittleEndian::write_u64(&mut bytes[8..16], self.st_ino);
        bytes[16] = self.st_filetype.into();
        LittleEndian::write_u64(&mut bytes[24..32], self.st_nlink);
        LittleEndian::write_u64(&mut bytes[32..40], self.st_size);
        LittleEndian::write_u64(&mut bytes[40..48], self.st_atim);
        LittleEndian::write_u64(&mut bytes[48..56], self.st_mtim);
        LittleEndian::write_u64(&mut bytes[56..64], self.st_ctim);
    }

    fn read_from(bytes: &[u8]) -> Self {
        Self {
            st_dev: LittleEndian::read_u64(&bytes[0..8]),
            st_ino: LittleEndian::read_u64(&bytes[8..16]),
            st_filetype: Filetype::try_from(bytes[16]).unwrap_or(Filetype::Unknown),
            st_nlink: LittleEndian::read_u64(&bytes[24..32]),
            st_size: LittleEndian::read_u64(&bytes[32..40]),
            st_atim: LittleEndian::read_u64(&bytes[40..48]),
            st_mtim: LittleEndian::read_u64(&bytes[48..56]),
            st_ctim: LittleEndian::read_u64(&bytes[56..64]),
        }
    }
}

/// Information about a pre-opened capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prestat {
    pub pr_type: Preopentype,
    /// Length of the directory name, in bytes.
    pub pr_name_len: u32,
}

impl Prestat {
    pub fn dir(pr_name_len: u32) -> Self {
        Self {
            pr_type: Preopentype::Dir,
            pr_name_len,
        }
    }
}

impl ValueType for Prestat {
    const SIZE: usize = 8;

    fn write_to(&self, bytes: &mut [u8]) {
        bytes.fill(0);
        bytes[0] = self.pr_type.into();
        LittleEndian::write_u32(&mut bytes[4..8], self.pr_name_len);
    }

    fn read_from(bytes: &[u8]) -> Self {
        Self {
            pr_type: Preopentype::Dir,
            pr_name_len: LittleEndian::read_u32(&bytes[4..8]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_filestat_layout() {
        let stat = Filestat {
            st_dev: 0x0102030405060708,
            st_ino: 7,
            st_filetype: Filetype::RegularFile,
            st_nlink: 1,
            st_size: 0xaabbccdd,
            st_atim: 1,
            st_mtim: 2,
            st_ctim: 3,
        };
        let mut bytes = [0xffu8; Filestat::SIZE];
        stat.write_to(&mut bytes);

        assert_eq!(
            &bytes[0..8],
            &[0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01]
        );
        assert_eq!(&bytes[8..16], &[7, 0, 0, 0, 0, 0, 0, 0]);
        // filetype plus padding
        assert_eq!(&bytes[16..24], &[4, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(&bytes[32..40], &[0xdd, 0xcc, 0xbb, 0xaa, 0, 0, 0, 0]);
        assert_eq!(&bytes[56..64], &[3, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(Filestat::read_from(&bytes), stat);
    }

    #[test]
    fn test_fdstat_layout() {
        let stat = Fdstat {
            fs_filetype: Filetype::Directory,
            fs_flags: Fdflags::APPEND,
            fs_rights_base: Rights::FD_READ | Rights::FD_WRITE,
            fs_rights_inheriting: Rights::empty(),
        };
        let mut bytes = [0xffu8; Fdstat::SIZE];
        stat.write_to(&mut bytes);

        assert_eq!(&bytes[0..8], &[3, 0, 1, 0, 0, 0, 0, 0]);
        assert_eq!(&bytes[8..16], &[0x42, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(&bytes[16..24], &[0; 8]);
    }

    #[test]
    fn test_prestat_layout() {
        let mut bytes = [0xffu8; Prestat::SIZE];
        Prestat::dir(4).write_to(&mut bytes);
        assert_eq!(bytes, [0, 0, 0, 0, 4, 0, 0, 0]);
    }

    #[test]
    fn test_whence_from_raw() {
        assert_eq!(Whence::try_from(2u8).ok(), Some(Whence::End));
        assert!(Whence::try_from(3u8).is_err());
    }
}
