use std::cmp;

use crate::{FsError, Result};

/// Largest size a single file may reach.
///
/// Guests address at most 4 GiB of linear memory, so nothing legitimate ever
/// needs more; it also bounds the allocation a stray seek followed by a write
/// can trigger.
pub const MAX_FILE_LEN: u64 = 1 << 32;

/// The contents of a regular file: one growable byte array addressed by
/// absolute offset.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FileBuffer {
    buffer: Vec<u8>,
}

impl FileBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            buffer: bytes.into(),
        }
    }

    pub fn len(&self) -> u64 {
        self.buffer.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    /// Copies bytes starting at `offset` into `buf`.
    ///
    /// Returns how many bytes were copied, which is 0 at or past the end.
    pub fn read_at(&self, offset: u64, buf: &mut [u8]) -> usize {
        if offset >= self.len() {
            return 0;
        }
        let start = offset as usize;
        let read = cmp::min(buf.len(), self.buffer.len() - start);
        buf[..read].copy_from_slice(&self.buffer[start..start + read]);
        read
    }

    /// Writes `data` at `offset`, overwriting what is there and extending
    /// the file as needed. A gap between the old end and `offset` reads back
    /// as zeroes.
    pub fn write_at(&mut self, offset: u64, data: &[u8]) -> Result<usize> {
        let end = offset
            .checked_add(data.len() as u64)
            .ok_or(FsError::FileTooLarge)?;
        if end > MAX_FILE_LEN {
            return Err(FsError::FileTooLarge);
        }
        let end = usize::try_from(end).map_err(|_| FsError::FileTooLarge)?;
        let start = end - data.len();
        if end > self.buffer.len() {
            self.buffer.resize(end, 0);
        }
        self.buffer[start..end].copy_from_slice(data);
        Ok(data.len())
    }

    /// Appends `data` at the end, returning the offset it landed at.
    pub fn append(&mut self, data: &[u8]) -> Result<u64> {
        let offset = self.len();
        self.write_at(offset, data)?;
        Ok(offset)
    }

    /// Truncates or zero-extends the file to `new_len` bytes.
    pub fn set_len(&mut self, new_len: u64) -> Result<()> {
        if new_len > MAX_FILE_LEN {
            return Err(FsError::FileTooLarge);
        }
        let new_len = usize::try_from(new_len).map_err(|_| FsError::FileTooLarge)?;
        self.buffer.resize(new_len, 0);
        Ok(())
    }

    pub fn truncate(&mut self) {
        self.buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_read_across_writes() {
        let mut file = FileBuffer::new();
        file.append(b"abc").unwrap();
        file.append(b"d").unwrap();
        file.append(b"efghi").unwrap();

        let mut buf = [0u8; 16];
        let read = file.read_at(0, &mut buf);
        assert_eq!(&buf[..read], b"abcdefghi");

        let read = file.read_at(2, &mut buf[..3]);
        assert_eq!(&buf[..read], b"cde");
    }

    #[test]
    fn test_read_at_eof() {
        let file = FileBuffer::from_bytes(b"xyz".to_vec());
        let mut buf = [7u8; 4];
        assert_eq!(file.read_at(3, &mut buf), 0);
        assert_eq!(file.read_at(100, &mut buf), 0);
        assert_eq!(buf, [7u8; 4]);
    }

    #[test]
    fn test_write_at_overwrites_and_extends() {
        let mut file = FileBuffer::from_bytes(b"hello world".to_vec());
        assert_eq!(file.write_at(0, b"HELLO").unwrap(), 5);
        assert_eq!(file.as_slice(), b"HELLO world");

        file.write_at(9, b"LD!!").unwrap();
        assert_eq!(file.as_slice(), b"HELLO worLD!!");
    }

    #[test]
    fn test_write_past_end_zero_fills() {
        let mut file = FileBuffer::from_bytes(b"ab".to_vec());
        file.write_at(4, b"z").unwrap();
        assert_eq!(file.as_slice(), b"ab\0\0z");
    }

    #[test]
    fn test_write_too_large() {
        let mut file = FileBuffer::new();
        assert_eq!(file.write_at(MAX_FILE_LEN, b"x"), Err(FsError::FileTooLarge));
        assert_eq!(file.write_at(u64::MAX, b"x"), Err(FsError::FileTooLarge));
        assert!(file.is_empty());
    }

    #[test]
    fn test_set_len() {
        let mut file = FileBuffer::from_bytes(b"abcdef".to_vec());
        file.set_len(2).unwrap();
        assert_eq!(file.as_slice(), b"ab");
        file.set_len(4).unwrap();
        assert_eq!(file.as_slice(), b"ab\0\0");
        file.truncate();
        assert_eq!(file.len(), 0);
    }
}
