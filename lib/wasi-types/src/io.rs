use crate::ValueType;
use byteorder::{ByteOrder, LittleEndian};

/// A region of guest memory to scatter data into.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Iovec {
    /// Guest address of the buffer to be filled.
    pub buf: u32,
    /// Length of the buffer to be filled.
    pub buf_len: u32,
}

/// A region of guest memory to gather data from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Ciovec {
    /// Guest address of the buffer to be written.
    pub buf: u32,
    /// Length of the buffer to be written.
    pub buf_len: u32,
}

macro_rules! impl_iovec_layout {
    ($($ty:ident),*) => {
        $(
            impl ValueType for $ty {
                const SIZE: usize = 8;

                fn write_to(&self, bytes: &mut [u8]) {
                    LittleEndian::write_u32(&mut bytes[0..4], self.buf);
                    LittleEndian::write_u32(&mut bytes[4..8], self.buf_len);
                }

                fn read_from(bytes: &[u8]) -> Self {
                    Self {
                        buf: LittleEndian::read_u32(&bytes[0..4]),
                        buf_len: LittleEndian::read_u32(&bytes[4..8]),
                    }
                }
            }
        )*
    };
}

impl_iovec_layout!(Iovec, Ciovec);
